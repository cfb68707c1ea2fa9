//! Static landing page copy

#[derive(Debug, PartialEq, Eq)]
pub struct TimelineEntry {
    pub title: &'static str,
    pub place: &'static str,
    pub period: &'static str,
    pub summary: &'static str,
}

pub const OWNER_NAME: &str = "Mehmet Duman";
pub const HEADLINE: &str = "Software engineer building fast, friendly tools";

pub const ABOUT: &str = "I like small programs with sharp edges filed off: \
    command-line tools, desktop apps and the services behind them. This page \
    lists the projects I am proudest of; the admin panel behind it is how I keep \
    that list current.";

pub const EXPERIENCE: [TimelineEntry; 2] = [
    TimelineEntry {
        title: "Software Engineer",
        place: "Independent",
        period: "2023 - present",
        summary: "Client projects across web, desktop and backend services.",
    },
    TimelineEntry {
        title: "Engineering Intern",
        place: "Product studio",
        period: "2022",
        summary: "Built internal dashboards and the APIs that fed them.",
    },
];

pub const EDUCATION: [TimelineEntry; 1] = [TimelineEntry {
    title: "B.Sc. Computer Engineering",
    place: "University",
    period: "2019 - 2023",
    summary: "Systems programming, networks and databases.",
}];

pub const SKILLS: [(&str, &[&str]); 3] = [
    ("Languages", &["Rust", "TypeScript", "SQL"]),
    ("Frameworks", &["Dioxus", "React", "Tokio"]),
    ("Platforms", &["Supabase", "PostgreSQL", "Linux"]),
];

pub const CONTACT_EMAIL: &str = "hello@hyscop.com";

/// Label shown in the navigation for a section id
pub fn section_label(id: &str) -> &str {
    match id {
        "home" => "Home",
        "about" => "About",
        "experience" => "Experience",
        "education" => "Education",
        "skills" => "Skills",
        "projects" => "Projects",
        "contact" => "Contact",
        other => other,
    }
}
