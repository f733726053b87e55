//! Site Data
//!
//! Static content tables rendered by the view initializers.

use serde::Serialize;

/// A portfolio project card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub tech: &'static [&'static str],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demo_link: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_link: Option<&'static str>,
}

/// A service offering card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Solution {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub tech: &'static [&'static str],
}

/// A timeline entry, newest first
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Milestone {
    pub id: u32,
    pub date: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    /// File name under the assets directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<&'static str>,
}

/// A blog post; `content` is authored HTML
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlogPost {
    pub slug: &'static str,
    pub title: &'static str,
    /// ISO date (`YYYY-MM-DD`)
    pub date: &'static str,
    pub category: &'static str,
    pub excerpt: &'static str,
    pub content: &'static str,
}

/// All content tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SiteData {
    pub projects: &'static [Project],
    pub solutions: &'static [Solution],
    pub milestones: &'static [Milestone],
    pub posts: &'static [BlogPost],
}

impl SiteData {
    /// The content shipped with the site
    pub fn site() -> Self {
        Self {
            projects: PROJECTS,
            solutions: SOLUTIONS,
            milestones: MILESTONES,
            posts: BLOG_POSTS,
        }
    }

    pub fn post(&self, slug: &str) -> Option<&'static BlogPost> {
        self.posts.iter().find(|post| post.slug == slug)
    }
}

impl Default for SiteData {
    fn default() -> Self {
        Self::site()
    }
}

pub static PROJECTS: &[Project] = &[
    Project {
        id: 1,
        title: "Project Alpha",
        description: "A modern web application built with cutting-edge technologies, focusing on user experience and performance.",
        tech: &["React", "Node.js", "PostgreSQL"],
        demo_link: None,
        github_link: None,
    },
    Project {
        id: 2,
        title: "Project Beta",
        description: "An open-source tool that simplifies complex workflows for developers and designers alike.",
        tech: &["TypeScript", "Vue", "MongoDB"],
        demo_link: None,
        github_link: None,
    },
    Project {
        id: 3,
        title: "Project Gamma",
        description: "A mobile-first platform designed to connect communities and foster collaboration.",
        tech: &["React Native", "GraphQL", "Firebase"],
        demo_link: None,
        github_link: None,
    },
    Project {
        id: 4,
        title: "Project Delta",
        description: "An innovative design system that promotes consistency and accelerates development.",
        tech: &["Design Tokens", "CSS", "JavaScript"],
        demo_link: None,
        github_link: None,
    },
    Project {
        id: 5,
        title: "Project Epsilon",
        description: "A data visualization tool that makes complex information accessible and engaging.",
        tech: &["D3.js", "Python", "WebGL"],
        demo_link: None,
        github_link: None,
    },
    Project {
        id: 6,
        title: "Project Zeta",
        description: "A developer toolkit that streamlines common tasks and improves productivity.",
        tech: &["CLI", "Node.js", "TypeScript"],
        demo_link: None,
        github_link: None,
    },
];

pub static SOLUTIONS: &[Solution] = &[
    Solution {
        id: 1,
        title: "Web Development Solutions",
        description: "Comprehensive web development services from frontend to backend, ensuring scalable and maintainable code.",
        tech: &["Full Stack", "Cloud", "DevOps"],
    },
    Solution {
        id: 2,
        title: "API Architecture",
        description: "Design and implementation of robust API solutions that scale with your business needs.",
        tech: &["REST", "GraphQL", "Microservices"],
    },
    Solution {
        id: 3,
        title: "Performance Optimization",
        description: "Expert analysis and optimization to improve application speed, efficiency, and user experience.",
        tech: &["Performance", "Caching", "CDN"],
    },
    Solution {
        id: 4,
        title: "Security Solutions",
        description: "Comprehensive security audits and implementations to protect your applications and data.",
        tech: &["Security", "Encryption", "Auth"],
    },
];

pub static MILESTONES: &[Milestone] = &[
    Milestone {
        id: 1,
        date: "February 2025",
        title: "Project Alpha Release",
        description: "Released Project Alpha to public beta. Started our first open-source initiative.",
        image: Some("ms2.png"),
    },
    Milestone {
        id: 2,
        date: "January 2025",
        title: "Website Launch",
        description: "Launched our new website and rebranded as OK Devs. Reached 1000+ community members.",
        image: Some("ms1.png"),
    },
    Milestone {
        id: 3,
        date: "Q4 2024",
        title: "Major Projects Completed",
        description: "Completed three major projects. Expanded our team with talented new members.",
        image: None,
    },
    Milestone {
        id: 4,
        date: "Q3 2024",
        title: "Community Event",
        description: "Hosted our first community event. Published 10+ technical blog posts.",
        image: None,
    },
    Milestone {
        id: 5,
        date: "Q2 2024",
        title: "Design System Launch",
        description: "Reached 500 active contributors. Launched our design system.",
        image: None,
    },
    Milestone {
        id: 6,
        date: "Q1 2024",
        title: "OK Devs Founded",
        description: "Formed OK Devs collective. Completed our first collaborative project.",
        image: None,
    },
];

pub static BLOG_POSTS: &[BlogPost] = &[
    BlogPost {
        slug: "minimal-design-maximal-impact",
        title: "Minimal Design, Maximal Impact",
        date: "2025-03-12",
        category: "Design",
        excerpt: "Why stripping an interface down to its essentials makes products easier to use and faster to ship.",
        content: "<p>Every element on a page competes for attention. Removing the ones that do not earn their place leaves the ones that matter room to work.</p>\
<h2>Start from the task</h2>\
<p>We sketch the single thing a visitor came to do, then add only what supports it. Navigation, color and motion all follow from that task.</p>\
<h2>Constraints as a feature</h2>\
<p>A small palette and one type scale keep pages consistent without a long style guide, and they make the design system cheap to maintain.</p>",
    },
    BlogPost {
        slug: "static-sites-on-github-pages",
        title: "Shipping a Single-Page Site on GitHub Pages",
        date: "2025-02-03",
        category: "Engineering",
        excerpt: "Hash routing, base paths and the small details that make a static SPA work from a project sub-directory.",
        content: "<p>GitHub Pages serves project sites from <code>/&lt;repo&gt;/</code>, which breaks every asset path written for the domain root.</p>\
<h2>Detect the base path once</h2>\
<p>The router derives the deployment prefix from the first page load and prefixes every fragment fetch and asset reference with it.</p>\
<h2>Prefer hashes</h2>\
<p>Hash addresses never reach the server, so a reload of <code>#projects</code> works without any rewrite rules.</p>",
    },
    BlogPost {
        slug: "building-in-the-open",
        title: "Building in the Open",
        date: "2024-11-20",
        category: "Community",
        excerpt: "What a year of open-source collaboration taught our collective about scope, feedback and shipping.",
        content: "<p>Working in public changed how we plan: smaller releases, clearer issues and a changelog people actually read.</p>\
<h2>Feedback early</h2>\
<p>Publishing rough drafts brought in reviewers we would never have reached with a finished product.</p>",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_tables() {
        let data = SiteData::site();
        assert_eq!(data.projects.len(), 6);
        assert_eq!(data.solutions.len(), 4);
        assert_eq!(data.milestones.len(), 6);
        assert_eq!(data.posts.len(), 3);
    }

    #[test]
    fn test_post_lookup() {
        let data = SiteData::site();
        let post = data.post("minimal-design-maximal-impact").unwrap();
        assert_eq!(post.title, "Minimal Design, Maximal Impact");
        assert!(data.post("missing").is_none());
    }

    #[test]
    fn test_slugs_are_unique() {
        let mut slugs: Vec<_> = BLOG_POSTS.iter().map(|p| p.slug).collect();
        slugs.sort_unstable();
        slugs.dedup();
        assert_eq!(slugs.len(), BLOG_POSTS.len());
    }

    #[test]
    fn test_serialize_project() {
        let json = serde_json::to_value(&PROJECTS[0]).unwrap();
        assert_eq!(json["title"], "Project Alpha");
        assert_eq!(json["tech"][1], "Node.js");
        assert!(json.get("demo_link").is_none());
    }
}
