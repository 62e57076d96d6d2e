//! Built-in content served when the remote services are unavailable.

use crate::models::{Post, Project, Source};

struct PostSeed {
    id: &'static str,
    title: &'static str,
    excerpt: &'static str,
    content: &'static str,
    category: &'static str,
    date: &'static str,
    read_time: u32,
    tags: &'static [&'static str],
}

const POSTS: &[PostSeed] = &[
    PostSeed {
        id: "1",
        title: "Building Multi-tenant Systems with Traefik and Docker",
        excerpt: "A deep dive into architecting scalable multi-tenant applications using Traefik as a reverse proxy and Docker for containerization.",
        content: "In this comprehensive guide, we explore the architecture and implementation of multi-tenant systems. We'll cover how to use Traefik for intelligent routing, Docker for containerization, and best practices for data isolation and security.",
        category: "DevOps",
        date: "2024-10-15",
        read_time: 12,
        tags: &["Docker", "Traefik", "DevOps", "Architecture"],
    },
    PostSeed {
        id: "2",
        title: "React Performance Optimization: From 3s to 0.8s Load Time",
        excerpt: "Practical techniques for optimizing React applications, including code splitting, lazy loading, and advanced caching strategies.",
        content: "Learn how to identify performance bottlenecks in React applications and implement solutions that dramatically improve load times. We'll cover code splitting, lazy loading, memoization, and more.",
        category: "Frontend",
        date: "2024-10-08",
        read_time: 15,
        tags: &["React", "Performance", "Optimization", "Frontend"],
    },
    PostSeed {
        id: "3",
        title: "Crafting Delightful UX with Framer Motion",
        excerpt: "Exploring advanced animation techniques and best practices for creating smooth, performant animations that enhance user experience.",
        content: "Discover how to use Framer Motion to create sophisticated animations that feel natural and performant. We'll explore gesture animations, layout animations, and performance optimization techniques.",
        category: "UX Design",
        date: "2024-09-30",
        read_time: 10,
        tags: &["Framer Motion", "Animation", "UX", "React"],
    },
    PostSeed {
        id: "4",
        title: "NestJS Best Practices: Building Scalable Backend Systems",
        excerpt: "A comprehensive guide to structuring NestJS applications for scalability, maintainability, and performance at enterprise scale.",
        content: "Learn NestJS best practices including module organization, dependency injection, middleware patterns, and testing strategies for building robust backend systems.",
        category: "Backend",
        date: "2024-09-22",
        read_time: 18,
        tags: &["NestJS", "Backend", "Architecture", "Node.js"],
    },
    PostSeed {
        id: "5",
        title: "PostgreSQL Query Optimization: Indexing Strategies",
        excerpt: "Master the art of database optimization through effective indexing strategies and query analysis techniques.",
        content: "Explore different indexing strategies, query planning, and optimization techniques to dramatically improve database performance in production environments.",
        category: "Backend",
        date: "2024-09-15",
        read_time: 14,
        tags: &["PostgreSQL", "Database", "Performance", "Backend"],
    },
    PostSeed {
        id: "6",
        title: "TypeScript Advanced Patterns: Generics and Utility Types",
        excerpt: "Deep dive into advanced TypeScript patterns that enable you to write more flexible, reusable, and type-safe code.",
        content: "Master advanced TypeScript concepts including generics, utility types, conditional types, and mapped types to write more expressive and maintainable code.",
        category: "Frontend",
        date: "2024-09-08",
        read_time: 11,
        tags: &["TypeScript", "Frontend", "Advanced", "Patterns"],
    },
];

struct ProjectSeed {
    id: &'static str,
    title: &'static str,
    slug: &'static str,
    description: &'static str,
    case_study: &'static str,
    category: &'static str,
    featured: bool,
    published_at: &'static str,
    tags: &'static [&'static str],
    technologies: &'static [&'static str],
    cover_image: &'static str,
}

const PROJECTS: &[ProjectSeed] = &[
    ProjectSeed {
        id: "1",
        title: "LMS Platform",
        slug: "lms-platform",
        description: "A comprehensive Learning Management System with real-time collaboration features and advanced analytics.",
        case_study: "Built a scalable LMS platform serving 10,000+ students with real-time notifications and progress tracking.",
        category: "fullstack",
        featured: true,
        published_at: "2024-01-15T00:00:00.000Z",
        tags: &["React", "NestJS", "PostgreSQL", "WebSocket"],
        technologies: &["React", "NestJS", "PostgreSQL", "WebSocket", "TypeScript"],
        cover_image: "/lms-dashboard.png",
    },
    ProjectSeed {
        id: "2",
        title: "Multi-tenant SaaS",
        slug: "multi-tenant-saas",
        description: "Enterprise SaaS platform with multi-tenancy, role-based access control, and advanced billing integration.",
        case_study: "Architected a multi-tenant system handling 50+ enterprise clients with isolated data and custom workflows.",
        category: "fullstack",
        featured: true,
        published_at: "2024-01-10T00:00:00.000Z",
        tags: &["Next.js", "NestJS", "MongoDB", "Stripe"],
        technologies: &["Next.js", "NestJS", "MongoDB", "Stripe", "TypeScript"],
        cover_image: "/saas-dashboard-multi-tenant.jpg",
    },
    ProjectSeed {
        id: "3",
        title: "Newsletter Builder",
        slug: "newsletter-builder",
        description: "Drag-and-drop email newsletter builder with template library and campaign analytics.",
        case_study: "Created an intuitive drag-and-drop interface enabling non-technical users to build professional newsletters.",
        category: "frontend",
        featured: false,
        published_at: "2024-01-05T00:00:00.000Z",
        tags: &["React", "TypeScript", "Tailwind", "Framer Motion"],
        technologies: &["React", "TypeScript", "Tailwind CSS", "Framer Motion"],
        cover_image: "/email-newsletter-builder-interface.jpg",
    },
    ProjectSeed {
        id: "4",
        title: "Media Mart Platform",
        slug: "media-mart-platform",
        description: "E-commerce platform for digital media with advanced search, filtering, and recommendation engine.",
        case_study: "Optimized search performance using Elasticsearch, reducing query time by 80% for 1M+ products.",
        category: "fullstack",
        featured: true,
        published_at: "2024-01-01T00:00:00.000Z",
        tags: &["Next.js", "PostgreSQL", "Elasticsearch", "Redis"],
        technologies: &["Next.js", "PostgreSQL", "Elasticsearch", "Redis", "TypeScript"],
        cover_image: "/ecommerce-media-marketplace.jpg",
    },
    ProjectSeed {
        id: "5",
        title: "Motion Design Library",
        slug: "motion-design-library",
        description: "Reusable component library with advanced animation patterns and accessibility features.",
        case_study: "Developed a comprehensive motion design system reducing development time by 40% across projects.",
        category: "frontend",
        featured: false,
        published_at: "2023-12-20T00:00:00.000Z",
        tags: &["React", "Framer Motion", "Storybook", "TypeScript"],
        technologies: &["React", "Framer Motion", "Storybook", "TypeScript"],
        cover_image: "/component-library-ui-design-system.jpg",
    },
    ProjectSeed {
        id: "6",
        title: "Analytics Dashboard",
        slug: "analytics-dashboard",
        description: "Real-time analytics dashboard with interactive charts, data visualization, and custom reporting.",
        case_study: "Built real-time dashboard processing 100K+ events per minute with sub-second query response times.",
        category: "fullstack",
        featured: false,
        published_at: "2023-12-15T00:00:00.000Z",
        tags: &["React", "D3.js", "Node.js", "PostgreSQL"],
        technologies: &["React", "D3.js", "Node.js", "PostgreSQL", "TypeScript"],
        cover_image: "/analytics-dashboard-charts.png",
    },
];

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_owned()).collect()
}

impl PostSeed {
    fn to_post(&self) -> Post {
        Post {
            id: self.id.to_owned(),
            slug: self.id.to_owned(),
            title: self.title.to_owned(),
            excerpt: self.excerpt.to_owned(),
            content: self.content.to_owned(),
            cover_image: None,
            category: self.category.to_owned(),
            tags: strings(self.tags),
            date: self.date.to_owned(),
            read_time: self.read_time,
            source: Source::Fallback,
            author: None,
            url: None,
            published_at: None,
        }
    }
}

impl ProjectSeed {
    fn to_project(&self) -> Project {
        Project {
            id: self.id.to_owned(),
            slug: self.slug.to_owned(),
            title: self.title.to_owned(),
            description: self.description.to_owned(),
            case_study: self.case_study.to_owned(),
            category: self.category.to_owned(),
            featured: self.featured,
            published_at: self.published_at.to_owned(),
            updated_at: self.published_at.to_owned(),
            tags: strings(self.tags),
            technologies: strings(self.technologies),
            live_url: Some("#".to_owned()),
            github_url: Some("#".to_owned()),
            cover_image: Some(self.cover_image.to_owned()),
            gallery: None,
            content: None,
            seo: None,
        }
    }
}

/// The six built-in posts, newest first. Their slugs are numeric so they
/// never collide with remote slugs.
pub fn posts() -> Vec<Post> {
    POSTS.iter().map(PostSeed::to_post).collect()
}

pub fn post(slug: &str) -> Option<Post> {
    POSTS.iter().find(|seed| seed.id == slug).map(PostSeed::to_post)
}

/// The six built-in projects, in their fixed order.
pub fn projects() -> Vec<Project> {
    PROJECTS.iter().map(ProjectSeed::to_project).collect()
}

pub fn featured_projects() -> Vec<Project> {
    projects().into_iter().filter(|project| project.featured).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_projects_are_fixed() {
        let slugs: Vec<String> = projects().into_iter().map(|p| p.slug).collect();
        assert_eq!(
            slugs,
            [
                "lms-platform",
                "multi-tenant-saas",
                "newsletter-builder",
                "media-mart-platform",
                "motion-design-library",
                "analytics-dashboard",
            ]
        );
        assert_eq!(projects(), projects());
    }

    #[test]
    fn featured_is_filtered_subset() {
        let featured: Vec<String> = featured_projects().into_iter().map(|p| p.slug).collect();
        assert_eq!(featured, ["lms-platform", "multi-tenant-saas", "media-mart-platform"]);
    }

    #[test]
    fn fallback_posts_have_numeric_slugs() {
        let posts = posts();
        assert_eq!(posts.len(), 6);
        for post in &posts {
            assert!(post.slug.parse::<u32>().is_ok());
            assert_eq!(post.source, Source::Fallback);
        }
        assert_eq!(post("3").map(|p| p.category).as_deref(), Some("UX Design"));
        assert!(post("lms-platform").is_none());
    }
}
