//! Milestone timeline

use async_trait::async_trait;

use super::{InitOutcome, ViewContext, ViewInitializer};
use crate::data::Milestone;
use crate::html::escape_html;
use crate::router::BasePath;

pub const TIMELINE_ID: &str = "milestonesTimeline";
/// Element the scroll-progress bar is attached to
pub const TIMELINE_LINE_ID: &str = "timelineLine";

pub struct MilestonesInitializer {
    milestones: &'static [Milestone],
}

impl MilestonesInitializer {
    pub fn new(milestones: &'static [Milestone]) -> Self {
        Self { milestones }
    }

    pub fn render(&self, base: &BasePath) -> String {
        if self.milestones.is_empty() {
            return "<p>No milestones found.</p>".to_string();
        }

        self.milestones
            .iter()
            .map(|m| {
                let media = m
                    .image
                    .map(|img| {
                        format!(
                            r#"<img src="{}" alt="{}" loading="lazy">"#,
                            escape_html(&base.asset_url(img)),
                            escape_html(m.title)
                        )
                    })
                    .unwrap_or_default();
                format!(
                    r#"<div class="milestone-item">
  <div class="milestone-content">
    <div class="milestone-date">{date}</div>
    <h3 class="milestone-title">{title}</h3>
    <p>{description}</p>
    <div class="milestone-media">{media}</div>
  </div>
</div>
"#,
                    date = escape_html(m.date),
                    title = escape_html(m.title),
                    description = escape_html(m.description),
                    media = media,
                )
            })
            .collect()
    }
}

#[async_trait(?Send)]
impl ViewInitializer for MilestonesInitializer {
    async fn initialize(&self, cx: &ViewContext<'_>) -> InitOutcome {
        if cx.dom.has_element(TIMELINE_ID) {
            cx.dom.set_inner_html(TIMELINE_ID, &self.render(cx.base_path));
        }
        InitOutcome::Ready
    }
}

/// Height of the timeline progress bar, in percent, for a scroll position
pub fn timeline_progress(scroll_top: f64, scroll_height: f64, viewport_height: f64) -> f64 {
    let scrollable = scroll_height - viewport_height;
    if scrollable <= 0.0 {
        return 0.0;
    }
    (scroll_top / scrollable * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::MILESTONES;
    use crate::host::MemoryDom;

    #[test]
    fn test_render_with_base_path() {
        let html = MilestonesInitializer::new(MILESTONES).render(&BasePath::new("/OK-DEVS/"));
        assert_eq!(html.matches(r#"class="milestone-item""#).count(), 6);
        assert!(html.contains(r#"<img src="/OK-DEVS/assets/ms1.png" alt="Website Launch""#));
    }

    #[test]
    fn test_render_at_root() {
        let html = MilestonesInitializer::new(MILESTONES).render(&BasePath::root());
        assert!(html.contains(r#"src="assets/ms2.png""#));
    }

    #[test]
    fn test_empty_timeline() {
        let html = MilestonesInitializer::new(&[]).render(&BasePath::root());
        assert_eq!(html, "<p>No milestones found.</p>");
    }

    #[tokio::test]
    async fn test_initialize_fills_timeline() {
        let dom = MemoryDom::new().with_element(TIMELINE_ID);
        let base = BasePath::root();
        let cx = ViewContext {
            dom: &dom,
            base_path: &base,
            param: None,
        };

        MilestonesInitializer::new(MILESTONES).initialize(&cx).await;
        assert!(dom
            .inner_html(TIMELINE_ID)
            .unwrap()
            .contains("OK Devs Founded"));
    }

    #[test]
    fn test_timeline_progress() {
        assert_eq!(timeline_progress(0.0, 2000.0, 1000.0), 0.0);
        assert_eq!(timeline_progress(500.0, 2000.0, 1000.0), 50.0);
        assert_eq!(timeline_progress(1500.0, 2000.0, 1000.0), 100.0);
        assert_eq!(timeline_progress(-20.0, 2000.0, 1000.0), 0.0);
        assert_eq!(timeline_progress(300.0, 800.0, 1000.0), 0.0);
    }
}
