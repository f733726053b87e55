//! Project and solution grids

use async_trait::async_trait;

use super::{InitOutcome, ViewContext, ViewInitializer};
use crate::data::{Project, Solution};
use crate::html::escape_html;

pub const PROJECTS_GRID_ID: &str = "projectsGrid";
pub const SOLUTIONS_GRID_ID: &str = "solutionsGrid";

fn tech_tags(tech: &[&str]) -> String {
    tech.iter()
        .map(|t| format!(r#"<span class="tech-tag">{}</span>"#, escape_html(t)))
        .collect()
}

pub struct ProjectsInitializer {
    projects: &'static [Project],
}

impl ProjectsInitializer {
    pub fn new(projects: &'static [Project]) -> Self {
        Self { projects }
    }

    pub fn render(&self) -> String {
        self.projects.iter().map(render_project).collect()
    }
}

fn render_project(project: &Project) -> String {
    format!(
        r##"<div class="project-card">
  <h3>{title}</h3>
  <p>{description}</p>
  <div class="project-tech">{tags}</div>
  <div class="project-links">
    <a href="{demo}" target="_blank" rel="noopener noreferrer" class="btn-primary">Live Demo</a>
    <a href="{github}" target="_blank" rel="noopener noreferrer" class="btn-secondary">GitHub</a>
  </div>
</div>
"##,
        title = escape_html(project.title),
        description = escape_html(project.description),
        tags = tech_tags(project.tech),
        demo = escape_html(project.demo_link.unwrap_or("#")),
        github = escape_html(project.github_link.unwrap_or("#")),
    )
}

#[async_trait(?Send)]
impl ViewInitializer for ProjectsInitializer {
    async fn initialize(&self, cx: &ViewContext<'_>) -> InitOutcome {
        cx.dom.set_inner_html(PROJECTS_GRID_ID, &self.render());
        InitOutcome::Ready
    }
}

pub struct SolutionsInitializer {
    solutions: &'static [Solution],
}

impl SolutionsInitializer {
    pub fn new(solutions: &'static [Solution]) -> Self {
        Self { solutions }
    }

    pub fn render(&self) -> String {
        self.solutions
            .iter()
            .map(|solution| {
                format!(
                    r##"<div class="solution-card">
  <h3>{title}</h3>
  <p>{description}</p>
  <div class="project-tech">{tags}</div>
  <a href="#" data-view="contact" class="btn-secondary">Get Started</a>
</div>
"##,
                    title = escape_html(solution.title),
                    description = escape_html(solution.description),
                    tags = tech_tags(solution.tech),
                )
            })
            .collect()
    }
}

#[async_trait(?Send)]
impl ViewInitializer for SolutionsInitializer {
    async fn initialize(&self, cx: &ViewContext<'_>) -> InitOutcome {
        cx.dom.set_inner_html(SOLUTIONS_GRID_ID, &self.render());
        InitOutcome::Ready
    }
}
