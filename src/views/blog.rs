//! Blog list and single post views

use async_trait::async_trait;
use chrono::NaiveDate;

use super::{InitOutcome, ViewContext, ViewInitializer};
use crate::data::BlogPost;
use crate::html::escape_html;
use crate::router::NavigationRequest;

pub const BLOG_GRID_ID: &str = "blogGrid";
pub const POST_TITLE_ID: &str = "blogPostTitle";
pub const POST_META_ID: &str = "blogPostMeta";
pub const POST_CONTENT_ID: &str = "blogPostContent";

/// Long-form display of an ISO date (`2025-03-12` -> `March 12, 2025`).
/// Anything else is shown as written.
pub fn display_date(raw: &str) -> String {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|date| date.format("%B %-d, %Y").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

fn render_meta(post: &BlogPost) -> String {
    format!(
        r#"<span class="blog-date">{}</span><span class="blog-category">{}</span>"#,
        escape_html(&display_date(post.date)),
        escape_html(post.category)
    )
}

pub struct BlogInitializer {
    posts: &'static [BlogPost],
}

impl BlogInitializer {
    pub fn new(posts: &'static [BlogPost]) -> Self {
        Self { posts }
    }

    pub fn render(&self) -> String {
        self.posts
            .iter()
            .map(|post| {
                format!(
                    r##"<article class="blog-card">
  <div class="blog-meta">{meta}</div>
  <h2>{title}</h2>
  <p>{excerpt}</p>
  <a href="#blog-{slug}" data-view="blog-post" data-blog-slug="{slug}" class="blog-link">Read more →</a>
</article>
"##,
                    meta = render_meta(post),
                    title = escape_html(post.title),
                    excerpt = escape_html(post.excerpt),
                    slug = escape_html(post.slug),
                )
            })
            .collect()
    }
}

#[async_trait(?Send)]
impl ViewInitializer for BlogInitializer {
    async fn initialize(&self, cx: &ViewContext<'_>) -> InitOutcome {
        cx.dom.set_inner_html(BLOG_GRID_ID, &self.render());
        InitOutcome::Ready
    }
}

/// Fills a single post; unknown or missing slugs redirect to `404`
pub struct BlogPostInitializer {
    posts: &'static [BlogPost],
}

impl BlogPostInitializer {
    pub fn new(posts: &'static [BlogPost]) -> Self {
        Self { posts }
    }

    fn find(&self, slug: &str) -> Option<&'static BlogPost> {
        self.posts.iter().find(|post| post.slug == slug)
    }
}

#[async_trait(?Send)]
impl ViewInitializer for BlogPostInitializer {
    async fn initialize(&self, cx: &ViewContext<'_>) -> InitOutcome {
        let Some(post) = cx.param.and_then(|slug| self.find(slug)) else {
            tracing::debug!("No blog post for slug {:?}", cx.param);
            return InitOutcome::Redirect(NavigationRequest::not_found());
        };

        cx.dom.set_text(POST_TITLE_ID, post.title);
        cx.dom.set_inner_html(POST_META_ID, &render_meta(post));
        cx.dom.set_inner_html(POST_CONTENT_ID, post.content);
        InitOutcome::Ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::BLOG_POSTS;
    use crate::host::MemoryDom;
    use crate::router::BasePath;

    fn post_dom() -> MemoryDom {
        MemoryDom::new()
            .with_element(POST_TITLE_ID)
            .with_element(POST_META_ID)
            .with_element(POST_CONTENT_ID)
    }

    #[test]
    fn test_display_date() {
        assert_eq!(display_date("2025-03-12"), "March 12, 2025");
        assert_eq!(display_date("2024-11-02"), "November 2, 2024");
        assert_eq!(display_date("Q4 2024"), "Q4 2024");
    }

    #[test]
    fn test_blog_grid_links() {
        let html = BlogInitializer::new(BLOG_POSTS).render();
        assert_eq!(html.matches(r#"class="blog-card""#).count(), 3);
        assert!(html.contains(
            r#"data-view="blog-post" data-blog-slug="minimal-design-maximal-impact""#
        ));
        assert!(html.contains("March 12, 2025"));
    }

    #[tokio::test]
    async fn test_known_slug_fills_post() {
        let dom = post_dom();
        let base = BasePath::root();
        let cx = ViewContext {
            dom: &dom,
            base_path: &base,
            param: Some("minimal-design-maximal-impact"),
        };

        let outcome = BlogPostInitializer::new(BLOG_POSTS).initialize(&cx).await;
        assert_eq!(outcome, InitOutcome::Ready);
        assert_eq!(
            dom.inner_html(POST_TITLE_ID).unwrap(),
            "Minimal Design, Maximal Impact"
        );
        assert!(dom.inner_html(POST_META_ID).unwrap().contains("Design"));
        assert!(dom
            .inner_html(POST_CONTENT_ID)
            .unwrap()
            .starts_with("<p>Every element"));
    }

    #[tokio::test]
    async fn test_unknown_or_missing_slug_redirects() {
        let dom = post_dom();
        let base = BasePath::root();
        let init = BlogPostInitializer::new(BLOG_POSTS);

        for param in [None, Some("no-such-post")] {
            let cx = ViewContext {
                dom: &dom,
                base_path: &base,
                param,
            };
            assert_eq!(
                init.initialize(&cx).await,
                InitOutcome::Redirect(NavigationRequest::not_found())
            );
        }
        assert_eq!(dom.inner_html(POST_TITLE_ID).unwrap(), "");
    }
}
