//! Static marketing copy served on the root page.

use serde::Serialize;
use utoipa::ToSchema;

/// A service offered by the agency.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ServiceOffering {
    pub title: &'static str,
    pub description: &'static str,
    pub details: &'static str,
}

/// A showcase student project.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StudentProject {
    pub title: &'static str,
    #[schema(value_type = Vec<String>)]
    pub technologies: &'static [&'static str],
    pub difficulty: &'static str,
}

pub const SERVICES: &[ServiceOffering] = &[
    ServiceOffering {
        title: "Web Development",
        description: "Scalable web solutions engineered for performance and conversion.",
        details: "Enterprise-grade web applications built with React, Next.js, Node.js and \
                  TypeScript, optimized for speed, accessibility and SEO, and shipped with \
                  testing, security hardening and deployment automation.",
    },
    ServiceOffering {
        title: "UI/UX Design",
        description: "Strategic design systems that drive user engagement and business growth.",
        details: "User research, wireframing and iterative prototyping, delivered as design \
                  systems and component libraries grounded in behavior analytics.",
    },
    ServiceOffering {
        title: "App Development",
        description: "Native and cross-platform mobile applications with enterprise reliability.",
        details: "iOS and Android applications built with React Native, Flutter and native \
                  frameworks, including offline support, real-time sync and store deployment.",
    },
];

pub const STUDENT_PROJECTS: &[StudentProject] = &[
    StudentProject {
        title: "E-Commerce Platform",
        technologies: &["React", "Node.js", "MongoDB", "Stripe"],
        difficulty: "Advanced",
    },
    StudentProject {
        title: "Task Management App",
        technologies: &["React", "Firebase", "Tailwind CSS", "TypeScript"],
        difficulty: "Intermediate",
    },
    StudentProject {
        title: "Social Media Platform",
        technologies: &["Next.js", "PostgreSQL", "Socket.io", "Redux"],
        difficulty: "Advanced",
    },
    StudentProject {
        title: "Fitness Tracker",
        technologies: &["React", "Express", "MySQL", "Chart.js"],
        difficulty: "Intermediate",
    },
    StudentProject {
        title: "AI Chatbot",
        technologies: &["Python", "Flask", "React", "TensorFlow"],
        difficulty: "Advanced",
    },
    StudentProject {
        title: "Weather Dashboard",
        technologies: &["Vue.js", "APIs", "D3.js", "WebSockets"],
        difficulty: "Intermediate",
    },
];
