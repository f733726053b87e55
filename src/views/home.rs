//! Home view: the two most recent milestones

use async_trait::async_trait;

use super::{InitOutcome, ViewContext, ViewInitializer};
use crate::data::Milestone;
use crate::html::escape_html;
use crate::router::BasePath;

pub const RECENT_MILESTONES_ID: &str = "recentMilestones";
pub const RECENT_MILESTONE_COUNT: usize = 2;

pub struct HomeInitializer {
    milestones: &'static [Milestone],
}

impl HomeInitializer {
    pub fn new(milestones: &'static [Milestone]) -> Self {
        Self { milestones }
    }

    pub fn render(&self, base: &BasePath) -> String {
        self.milestones
            .iter()
            .take(RECENT_MILESTONE_COUNT)
            .map(|m| {
                let image = m
                    .image
                    .map(|img| {
                        format!(
                            r#"<div class="milestone-card-image"><img src="{}" alt="{}" loading="lazy"></div>"#,
                            escape_html(&base.asset_url(img)),
                            escape_html(m.title)
                        )
                    })
                    .unwrap_or_default();
                format!(
                    r#"<div class="milestone-card">
  <div class="milestone-date">{}</div>
  <h3>{}</h3>
  <p>{}</p>
  {}
</div>
"#,
                    escape_html(m.date),
                    escape_html(m.title),
                    escape_html(m.description),
                    image
                )
            })
            .collect()
    }
}

#[async_trait(?Send)]
impl ViewInitializer for HomeInitializer {
    async fn initialize(&self, cx: &ViewContext<'_>) -> InitOutcome {
        // An empty table leaves the fragment's placeholder in place
        if !self.milestones.is_empty() {
            cx.dom
                .set_inner_html(RECENT_MILESTONES_ID, &self.render(cx.base_path));
        }
        InitOutcome::Ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::MILESTONES;
    use crate::host::{Dom, MemoryDom};

    #[tokio::test]
    async fn test_recent_milestones() {
        let dom = MemoryDom::new().with_element(RECENT_MILESTONES_ID);
        let base = BasePath::new("/OK-DEVS/");
        let cx = ViewContext {
            dom: &dom,
            base_path: &base,
            param: None,
        };

        HomeInitializer::new(MILESTONES).initialize(&cx).await;

        let html = dom.inner_html(RECENT_MILESTONES_ID).unwrap();
        assert_eq!(html.matches(r#"class="milestone-card""#).count(), 2);
        assert!(html.contains("Project Alpha Release"));
        assert!(html.contains("/OK-DEVS/assets/ms1.png"));
        assert!(!html.contains("Major Projects Completed"));
    }

    #[tokio::test]
    async fn test_empty_table_keeps_placeholder() {
        let dom = MemoryDom::new().with_element(RECENT_MILESTONES_ID);
        dom.set_inner_html(RECENT_MILESTONES_ID, "<p>Loading…</p>");
        let base = BasePath::root();
        let cx = ViewContext {
            dom: &dom,
            base_path: &base,
            param: None,
        };

        HomeInitializer::new(&[]).initialize(&cx).await;
        assert_eq!(dom.inner_html(RECENT_MILESTONES_ID).unwrap(), "<p>Loading…</p>");
    }
}
