// src/formatting/block_renderer.rs
//! Block rendering engine: converts one page's blocks to Markdown.
//!
//! Rendering is not pure. Nested children are fetched on demand, media is
//! downloaded as it is met, and child pages are handed to a
//! [`PageDiscovery`] so they can be exported as documents of their own.

use futures::future::{BoxFuture, FutureExt};

use super::rich_text::concat_plain_text;
use crate::api::{fetch_all_blocks, BlockSource};
use crate::constants::{CHARS_PER_BLOCK_ESTIMATE, INDENT_UNIT, SKIPPED_PHRASES};
use crate::crawl::{PageDiscovery, PageTask};
use crate::error::AppError;
use crate::media::MediaFetcher;
use crate::model::blocks::{ChildPageBlock, FileBlock, ImageBlock, TextBlockContent};
use crate::model::Block;
use crate::output::{
    attachment_file_name, attachment_link, attachment_stem, document_file_name, image_link,
    OutputLayout,
};

/// How nested blocks are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndentStyle {
    /// Every block starts at column zero, whatever its depth.
    #[default]
    Flat,
    /// Lines contributed by a block at depth `n` are indented by `n` units.
    Nested,
}

/// Download outcomes for one page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MediaStats {
    pub images_saved: usize,
    pub images_failed: usize,
    pub attachments_saved: usize,
    pub attachments_failed: usize,
}

impl MediaStats {
    pub fn failures(&self) -> usize {
        self.images_failed + self.attachments_failed
    }

    pub fn merge(&mut self, other: &MediaStats) {
        self.images_saved += other.images_saved;
        self.images_failed += other.images_failed;
        self.attachments_saved += other.attachments_saved;
        self.attachments_failed += other.attachments_failed;
    }
}

/// Renders the blocks of a single page.
///
/// Create one per page; the borrowed discovery sink is released when the
/// renderer is dropped.
pub struct DocumentRenderer<'a> {
    source: &'a dyn BlockSource,
    media: &'a dyn MediaFetcher,
    layout: &'a OutputLayout,
    indent: IndentStyle,
    discoveries: &'a mut dyn PageDiscovery,
    stats: MediaStats,
    blocks_rendered: usize,
}

impl<'a> DocumentRenderer<'a> {
    pub fn new(
        source: &'a dyn BlockSource,
        media: &'a dyn MediaFetcher,
        layout: &'a OutputLayout,
        discoveries: &'a mut dyn PageDiscovery,
    ) -> Self {
        Self {
            source,
            media,
            layout,
            indent: IndentStyle::default(),
            discoveries,
            stats: MediaStats::default(),
            blocks_rendered: 0,
        }
    }

    pub fn with_indent(mut self, indent: IndentStyle) -> Self {
        self.indent = indent;
        self
    }

    pub fn media_stats(&self) -> MediaStats {
        self.stats
    }

    /// Blocks rendered so far, nested ones included.
    pub fn blocks_rendered(&self) -> usize {
        self.blocks_rendered
    }

    /// Renders `blocks` in order. Children of any block other than a child
    /// page are fetched and rendered one level deeper, right after their
    /// parent's own output.
    pub fn render<'r>(
        &'r mut self,
        blocks: &'r [Block],
        indent_level: usize,
    ) -> BoxFuture<'r, Result<String, AppError>> {
        async move {
            let mut output = String::with_capacity(blocks.len() * CHARS_PER_BLOCK_ESTIMATE);

            for block in blocks {
                self.blocks_rendered += 1;

                let own = match block {
                    Block::ChildPage(page) => match self.render_child_page(page) {
                        Some(link) => link,
                        None => continue,
                    },
                    Block::Image(image) => self.render_image(image).await,
                    Block::File(file) => self.render_file(file).await,
                    Block::Heading1(b) => render_text_line("## ", &b.content),
                    Block::Heading2(b) => render_text_line("### ", &b.content),
                    Block::Heading3(b) => render_text_line("#### ", &b.content),
                    Block::Paragraph(b) => render_text_line("", &b.content),
                    Block::BulletedListItem(b) => {
                        format!("* {}\n", concat_plain_text(&b.content.rich_text))
                    }
                    Block::Unsupported(b) => {
                        log::debug!("No output for {} block {}", b.block_type, b.common.id);
                        String::new()
                    }
                };
                output.push_str(&self.apply_indent(&own, indent_level));

                if block.has_children() && !block.owns_separate_document() {
                    let children = fetch_all_blocks(self.source, block.id()).await?;
                    let nested = self.render(&children, indent_level + 1).await?;
                    output.push_str(&nested);
                }
            }

            Ok(output)
        }
        .boxed()
    }

    fn render_child_page(&mut self, page: &ChildPageBlock) -> Option<String> {
        if page.title.trim().is_empty() {
            log::warn!("Skipping child page {} with an empty title", page.common.id);
            return None;
        }

        let file_name = document_file_name(&page.title);
        if !self.discoveries.is_visited(&page.common.id) {
            self.discoveries.discover(PageTask::new(
                page.common.id.clone(),
                page.title.clone(),
                file_name.clone(),
            ));
        }

        Some(format!("\n\n### 📄 [{}](./{})\n\n", page.title, file_name))
    }

    async fn render_image(&mut self, image: &ImageBlock) -> String {
        let id = &image.common.id;
        let destination = self.layout.image_path(id);
        let link = image_link(id);

        if self.media.download(image.image.url(), &destination).await {
            log::debug!("Saved image {}", link);
            self.stats.images_saved += 1;
        } else {
            log::warn!("Image {} not saved; linking it anyway", link);
            self.stats.images_failed += 1;
        }

        format!("\n\n![image]({})\n\n", link)
    }

    async fn render_file(&mut self, file: &FileBlock) -> String {
        let caption = concat_plain_text(&file.caption);
        let name = attachment_file_name(&attachment_stem(&caption, &file.common.id));
        let destination = self.layout.attachment_path(&name);

        if self.media.download(file.file.url(), &destination).await {
            self.stats.attachments_saved += 1;
            let link = attachment_link(&name);
            log::debug!("Linked attachment {}", link);
            format!("\n\n[📎 Attachment: {}]({})\n\n", name, link)
        } else {
            self.stats.attachments_failed += 1;
            String::new()
        }
    }

    fn apply_indent(&self, text: &str, indent_level: usize) -> String {
        match self.indent {
            IndentStyle::Flat => text.to_string(),
            IndentStyle::Nested if indent_level == 0 => text.to_string(),
            IndentStyle::Nested => indent_lines(text, &INDENT_UNIT.repeat(indent_level)),
        }
    }
}

/// `<prefix><text>\n\n`, or nothing when the text is navigation boilerplate.
fn render_text_line(prefix: &str, content: &TextBlockContent) -> String {
    let text = concat_plain_text(&content.rich_text);
    if is_skipped(&text) {
        log::debug!("Dropping navigation text {:?}", text);
        return String::new();
    }
    format!("{}{}\n\n", prefix, text)
}

fn is_skipped(text: &str) -> bool {
    SKIPPED_PHRASES.iter().any(|phrase| text.contains(phrase))
}

/// Prefixes every non-empty line with `pad`, keeping line endings intact.
fn indent_lines(text: &str, pad: &str) -> String {
    let mut out = String::with_capacity(text.len() + pad.len() * 4);
    for line in text.split_inclusive('\n') {
        if line != "\n" {
            out.push_str(pad);
        }
        out.push_str(line);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::PaginatedResponse;
    use crate::crawl::CrawlQueue;
    use crate::model::blocks::*;
    use crate::model::common::BlockCommon;
    use crate::types::{NotionId, RichTextItem};
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    fn id(n: u32) -> NotionId {
        NotionId::parse(&format!("{:032x}", n)).unwrap()
    }

    fn text(s: &str) -> TextBlockContent {
        TextBlockContent::new(vec![RichTextItem::plain_text(s)])
    }

    fn paragraph(n: u32, s: &str) -> Block {
        Block::Paragraph(ParagraphBlock {
            common: BlockCommon::new(id(n)),
            content: text(s),
        })
    }

    fn bullet(n: u32, s: &str) -> Block {
        Block::BulletedListItem(BulletedListItemBlock {
            common: BlockCommon::new(id(n)),
            content: text(s),
        })
    }

    fn child_page(n: u32, title: &str) -> Block {
        Block::ChildPage(ChildPageBlock {
            common: BlockCommon::new(id(n)).with_children(),
            title: title.to_string(),
        })
    }

    #[derive(Default)]
    struct FakeSource {
        children: HashMap<NotionId, Vec<Block>>,
        requested: Mutex<Vec<NotionId>>,
    }

    #[async_trait::async_trait]
    impl BlockSource for FakeSource {
        async fn list_children(
            &self,
            container: &NotionId,
            _cursor: Option<String>,
        ) -> Result<PaginatedResponse<Block>, AppError> {
            self.requested.lock().unwrap().push(container.clone());
            Ok(PaginatedResponse::last(
                self.children.get(container).cloned().unwrap_or_default(),
            ))
        }
    }

    /// Succeeds for every URL not in `failing`.
    #[derive(Default)]
    struct FakeMedia {
        failing: Vec<String>,
        saved: Mutex<Vec<PathBuf>>,
    }

    #[async_trait::async_trait]
    impl MediaFetcher for FakeMedia {
        async fn download(&self, url: &str, destination: &Path) -> bool {
            if self.failing.iter().any(|u| u == url) {
                return false;
            }
            self.saved.lock().unwrap().push(destination.to_path_buf());
            true
        }
    }

    async fn render_with(
        source: &FakeSource,
        media: &FakeMedia,
        queue: &mut CrawlQueue,
        indent: IndentStyle,
        blocks: &[Block],
    ) -> (String, MediaStats) {
        let layout = OutputLayout::new("out");
        let mut renderer = DocumentRenderer::new(source, media, &layout, queue).with_indent(indent);
        let body = renderer.render(blocks, 0).await.unwrap();
        (body, renderer.media_stats())
    }

    #[tokio::test]
    async fn headings_and_paragraphs() {
        let blocks = vec![
            Block::Heading1(Heading1Block {
                common: BlockCommon::new(id(1)),
                content: text("One"),
            }),
            Block::Heading2(Heading2Block {
                common: BlockCommon::new(id(2)),
                content: text("Two"),
            }),
            Block::Heading3(Heading3Block {
                common: BlockCommon::new(id(3)),
                content: text("Three"),
            }),
            paragraph(4, "Body"),
        ];

        let (body, _) = render_with(
            &FakeSource::default(),
            &FakeMedia::default(),
            &mut CrawlQueue::new(),
            IndentStyle::Flat,
            &blocks,
        )
        .await;

        assert_eq!(body, "## One\n\n### Two\n\n#### Three\n\nBody\n\n");
    }

    #[tokio::test]
    async fn bullet_concatenates_runs() {
        let blocks = vec![Block::BulletedListItem(BulletedListItemBlock {
            common: BlockCommon::new(id(1)),
            content: TextBlockContent::new(vec![
                RichTextItem::plain_text("Buy "),
                RichTextItem::plain_text("milk"),
            ]),
        })];

        let (body, _) = render_with(
            &FakeSource::default(),
            &FakeMedia::default(),
            &mut CrawlQueue::new(),
            IndentStyle::Flat,
            &blocks,
        )
        .await;

        assert_eq!(body, "* Buy milk\n");
    }

    #[tokio::test]
    async fn navigation_phrases_are_dropped() {
        let blocks = vec![
            paragraph(1, "→ トップページに戻る"),
            Block::Heading2(Heading2Block {
                common: BlockCommon::new(id(2)),
                content: text("TOPへ戻る"),
            }),
            paragraph(3, "目次へ戻る"),
            paragraph(4, "kept"),
        ];

        let (body, _) = render_with(
            &FakeSource::default(),
            &FakeMedia::default(),
            &mut CrawlQueue::new(),
            IndentStyle::Flat,
            &blocks,
        )
        .await;

        assert_eq!(body, "kept\n\n");
    }

    #[tokio::test]
    async fn child_pages_are_linked_and_queued_but_not_expanded() {
        let source = FakeSource::default();
        let mut queue = CrawlQueue::new();
        let blocks = vec![child_page(1, "A"), child_page(2, "   ")];

        let (body, _) = render_with(
            &source,
            &FakeMedia::default(),
            &mut queue,
            IndentStyle::Flat,
            &blocks,
        )
        .await;

        assert_eq!(body, "\n\n### 📄 [A](./A.md)\n\n");
        assert_eq!(queue.pending_len(), 1);
        assert_eq!(
            queue.next_pending(),
            Some(PageTask::new(id(1), "A", "A.md"))
        );
        assert!(source.requested.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn visited_child_page_is_linked_without_requeue() {
        let mut queue = CrawlQueue::new();
        queue.mark_visited(id(1));

        let (body, _) = render_with(
            &FakeSource::default(),
            &FakeMedia::default(),
            &mut queue,
            IndentStyle::Flat,
            &[child_page(1, "Done: yes")],
        )
        .await;

        assert_eq!(body, "\n\n### 📄 [Done: yes](./Done_ yes.md)\n\n");
        assert!(queue.is_empty());
    }

    #[tokio::test]
    async fn failed_image_is_still_linked() {
        let media = FakeMedia {
            failing: vec!["https://img.test/broken.png".to_string()],
            ..Default::default()
        };
        let blocks = vec![Block::Image(ImageBlock {
            common: BlockCommon::new(id(9)),
            image: FileObject::external("https://img.test/broken.png"),
        })];

        let (body, stats) = render_with(
            &FakeSource::default(),
            &media,
            &mut CrawlQueue::new(),
            IndentStyle::Flat,
            &blocks,
        )
        .await;

        assert_eq!(
            body,
            "\n\n![image](images/00000000-0000-0000-0000-000000000009.png)\n\n"
        );
        assert_eq!(stats.images_failed, 1);
        assert_eq!(stats.images_saved, 0);
    }

    #[tokio::test]
    async fn attachment_linked_only_when_saved() {
        let media = FakeMedia {
            failing: vec!["https://files.test/bad.pdf".to_string()],
            ..Default::default()
        };
        let blocks = vec![
            Block::File(FileBlock {
                common: BlockCommon::new(id(1)),
                file: FileObject::hosted("https://files.test/good.pdf"),
                caption: vec![RichTextItem::plain_text("Q3  report")],
            }),
            Block::File(FileBlock {
                common: BlockCommon::new(id(2)),
                file: FileObject::external("https://files.test/bad.pdf"),
                caption: vec![],
            }),
        ];

        let (body, stats) = render_with(
            &FakeSource::default(),
            &media,
            &mut CrawlQueue::new(),
            IndentStyle::Flat,
            &blocks,
        )
        .await;

        assert_eq!(
            body,
            "\n\n[📎 Attachment: Q3_report.pdf](files/Q3_report.pdf)\n\n"
        );
        assert_eq!(stats.attachments_saved, 1);
        assert_eq!(stats.attachments_failed, 1);
        assert_eq!(
            *media.saved.lock().unwrap(),
            vec![PathBuf::from("out/files/Q3_report.pdf")]
        );
    }

    #[tokio::test]
    async fn children_follow_their_parent() {
        let mut source = FakeSource::default();
        source
            .children
            .insert(id(1), vec![bullet(2, "inner"), bullet(3, "inner two")]);
        let blocks = vec![
            Block::BulletedListItem(BulletedListItemBlock {
                common: BlockCommon::new(id(1)).with_children(),
                content: text("outer"),
            }),
            paragraph(4, "after"),
        ];

        let (flat, _) = render_with(
            &source,
            &FakeMedia::default(),
            &mut CrawlQueue::new(),
            IndentStyle::Flat,
            &blocks,
        )
        .await;
        assert_eq!(flat, "* outer\n* inner\n* inner two\nafter\n\n");

        let (nested, _) = render_with(
            &source,
            &FakeMedia::default(),
            &mut CrawlQueue::new(),
            IndentStyle::Nested,
            &blocks,
        )
        .await;
        assert_eq!(nested, "* outer\n    * inner\n    * inner two\nafter\n\n");
    }

    #[tokio::test]
    async fn unsupported_blocks_still_expand_children() {
        let mut source = FakeSource::default();
        source.children.insert(id(1), vec![paragraph(2, "inside toggle")]);
        let blocks = vec![Block::Unsupported(UnsupportedBlock {
            common: BlockCommon::new(id(1)).with_children(),
            block_type: "toggle".to_string(),
        })];

        let (body, _) = render_with(
            &source,
            &FakeMedia::default(),
            &mut CrawlQueue::new(),
            IndentStyle::Flat,
            &blocks,
        )
        .await;

        assert_eq!(body, "inside toggle\n\n");
    }

    #[test]
    fn indent_skips_blank_lines() {
        assert_eq!(indent_lines("\n\nx\n\n", "  "), "\n\n  x\n\n");
        assert_eq!(indent_lines("a\nb", "  "), "  a\n  b");
    }
}
