//! Fixed content served when the live store cannot answer.
//!
//! The snapshot is versioned by [`FALLBACK_VERSION`] and is read-only: it has
//! no insert path. Case studies are keyed by project id because every lookup
//! is made by project.

use std::collections::BTreeMap;

use portfolio_core::filter::ProjectFilter;
use portfolio_core::types::DbId;

use crate::models::case_study::{CaseStudy, Challenge, KeyLearning, Outcome, ProcessStep};
use crate::models::project::Project;

/// Version tag of the built-in snapshot. Bump when the content changes.
pub const FALLBACK_VERSION: &str = "2024.1";

/// A read-only set of projects and case studies.
#[derive(Debug, Clone)]
pub struct FallbackData {
    version: String,
    projects: Vec<Project>,
    case_studies: BTreeMap<DbId, CaseStudy>,
}

impl FallbackData {
    /// Build a snapshot from explicit content.
    ///
    /// Case studies whose `project_id` has no matching project are dropped,
    /// so a snapshot never references a project it does not contain.
    pub fn new(version: &str, projects: Vec<Project>, case_studies: Vec<CaseStudy>) -> Self {
        let case_studies = case_studies
            .into_iter()
            .filter(|cs| projects.iter().any(|p| p.id == cs.project_id))
            .map(|cs| (cs.project_id, cs))
            .collect();
        Self {
            version: version.to_string(),
            projects,
            case_studies,
        }
    }

    /// The snapshot shipped with the application.
    pub fn builtin() -> Self {
        Self::new(FALLBACK_VERSION, builtin_projects(), builtin_case_studies())
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Projects passing `filter`, in snapshot order.
    pub fn projects(&self, filter: &ProjectFilter) -> Vec<Project> {
        self.projects
            .iter()
            .filter(|p| filter.matches(&p.category, &p.tags))
            .cloned()
            .collect()
    }

    pub fn project(&self, id: DbId) -> Option<Project> {
        self.projects.iter().find(|p| p.id == id).cloned()
    }

    pub fn case_studies(&self) -> Vec<CaseStudy> {
        self.case_studies.values().cloned().collect()
    }

    pub fn case_study_for_project(&self, project_id: DbId) -> Option<CaseStudy> {
        self.case_studies.get(&project_id).cloned()
    }
}

// ---------------------------------------------------------------------------
// Built-in content
// ---------------------------------------------------------------------------

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn challenge(icon: &str, title: &str, description: &str) -> Challenge {
    Challenge {
        icon: icon.into(),
        title: title.into(),
        description: description.into(),
    }
}

fn step(icon: &str, title: &str, description: &str) -> ProcessStep {
    ProcessStep {
        icon: icon.into(),
        title: title.into(),
        description: description.into(),
    }
}

fn outcome(metric: &str, description: &str) -> Outcome {
    Outcome {
        metric: metric.into(),
        description: description.into(),
    }
}

fn learning(title: &str, description: &str) -> KeyLearning {
    KeyLearning {
        title: title.into(),
        description: description.into(),
    }
}

fn builtin_projects() -> Vec<Project> {
    vec![
        Project {
            id: 1,
            title: "Public Website Redesign".into(),
            description: "UI/UX Design, Web Development".into(),
            category: "ui".into(),
            image_src: "https://images.unsplash.com/photo-1581291518633-83b4ebd1d83e?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&h=600".into(),
            tags: strings(&["Figma", "Design System", "Responsive Design"]),
        },
        Project {
            id: 2,
            title: "Platform Core Experience".into(),
            description: "Product Management, UX Strategy".into(),
            category: "product".into(),
            image_src: "https://images.unsplash.com/photo-1531403009284-440f080d1e12?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&h=600".into(),
            tags: strings(&["Roadmapping", "User Interviews", "Feature Prioritization"]),
        },
        Project {
            id: 3,
            title: "Learning Platform".into(),
            description: "Product Manager".into(),
            category: "product".into(),
            image_src: "https://images.unsplash.com/photo-1586281380117-5a60ae2050cc?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&h=600".into(),
            tags: strings(&["Product Management", "Communication", "Roadmapping", "Leadership"]),
        },
    ]
}

fn builtin_case_studies() -> Vec<CaseStudy> {
    vec![
        CaseStudy {
            id: 1,
            project_id: 1,
            client: "Fintech Company".into(),
            timeline: "4 months".into(),
            role: "Lead UI/UX Designer".into(),
            tools: strings(&["Figma", "Adobe Creative Suite", "HTML/CSS"]),
            overview: "Complete redesign of the public-facing website for a fintech company, focusing on improving user engagement, conversion rates, and overall brand perception.".into(),
            challenges: vec![
                challenge(
                    "chart-line",
                    "Low Conversion Rate",
                    "The existing website had poor conversion metrics with high bounce rates and low time-on-page.",
                ),
                challenge(
                    "users",
                    "Inconsistent Brand Experience",
                    "Brand elements varied across pages creating a disjointed user experience.",
                ),
                challenge(
                    "globe",
                    "International Audience",
                    "The website needed to serve users from multiple countries with different regulatory requirements.",
                ),
            ],
            process: vec![
                step(
                    "search",
                    "Research & Discovery",
                    "Conducted competitor analysis, user interviews, and stakeholder workshops to gather requirements and set project goals.",
                ),
                step(
                    "sitemap",
                    "Information Architecture",
                    "Reorganized the site structure to improve findability and user flow based on user feedback and analytics.",
                ),
                step(
                    "pencil-ruler",
                    "Wireframing & Prototyping",
                    "Created low and high-fidelity wireframes to test navigation patterns and content organization.",
                ),
                step(
                    "paint-brush",
                    "Visual Design",
                    "Developed a comprehensive UI kit and style guide to ensure brand consistency across all pages.",
                ),
            ],
            results: vec![
                outcome("+58%", "Increase in Conversion Rate"),
                outcome("+42%", "Increase in Time on Site"),
                outcome("-32%", "Reduction in Bounce Rate"),
            ],
            key_learnings: vec![
                learning(
                    "User-Centered Approach",
                    "Prioritizing user needs over stakeholder preferences led to better performance metrics and improved user satisfaction.",
                ),
                learning(
                    "Iterative Testing",
                    "Regular user testing throughout the design process helped identify issues early and validate design decisions.",
                ),
                learning(
                    "Content Strategy",
                    "Integrating content creation with design processes ensured messaging and visuals worked together coherently.",
                ),
            ],
        },
        CaseStudy {
            id: 2,
            project_id: 2,
            client: "CAIS".into(),
            timeline: "6 months".into(),
            role: "Product Manager".into(),
            tools: strings(&["Jira", "Figma", "Google Analytics"]),
            overview: "Led the redesign of core platform features to improve user experience and operational efficiency while reducing technical debt.".into(),
            challenges: vec![
                challenge(
                    "scale",
                    "Balance reuse with innovation",
                    "Needed to standardize components across products while allowing for innovation and customization.",
                ),
                challenge(
                    "pencil",
                    "User Growth without UX Scaling",
                    "The platform's user base had grown significantly, but UX resources hadn't scaled accordingly.",
                ),
                challenge(
                    "messages-square",
                    "Lack of Ownership & Communication",
                    "Teams were working in silos, causing inconsistent user experiences and redundant development efforts.",
                ),
            ],
            process: vec![
                step(
                    "network",
                    "Reusable components architecture",
                    "Established a component-based design system that balanced standardization with flexibility.",
                ),
                step(
                    "folder-open",
                    "Backlog & Documentation",
                    "Created comprehensive documentation and prioritized product backlog to align development efforts.",
                ),
                step(
                    "screen-share",
                    "Demo & Stakeholders",
                    "Implemented regular cross-functional demos to break down silos and improve communication.",
                ),
                step(
                    "users-round",
                    "Team Growth & Mentorship",
                    "Expanded and mentored the product team to handle increased platform complexity.",
                ),
            ],
            results: vec![
                outcome("+40%", "Increase in Feature Development Speed"),
                outcome("+65%", "Improvement in User Satisfaction"),
                outcome("-50%", "Reduction in Design Inconsistencies"),
            ],
            key_learnings: vec![
                learning(
                    "Reestablished Ownership",
                    "Clear ownership of components and features led to better quality and faster development.",
                ),
                learning(
                    "Organized & Prioritized",
                    "Structured approach to backlog management improved focus on high-impact features.",
                ),
                learning(
                    "Built a Lean Core Team",
                    "Small, highly skilled teams with clear responsibilities outperformed larger teams with ambiguous roles.",
                ),
                learning(
                    "User-Centered Enhancements",
                    "Continuous user feedback ensured features met actual needs rather than assumed requirements.",
                ),
            ],
        },
        CaseStudy {
            id: 3,
            project_id: 3,
            client: "CAIS".into(),
            timeline: "5 months".into(),
            role: "Product Manager".into(),
            tools: strings(&["Jira", "Confluence", "Slack", "Miro"]),
            overview: "Led the development of a comprehensive learning platform for financial advisors, focusing on educational content delivery and certification tracking.".into(),
            challenges: vec![
                challenge(
                    "puzzle",
                    "Complex Integration Requirements",
                    "The platform needed to integrate with multiple existing systems including CRM, LMS, and certification databases.",
                ),
                challenge(
                    "users",
                    "Diverse User Needs",
                    "Users ranged from novice to expert financial advisors with varying technical abilities and educational requirements.",
                ),
                challenge(
                    "calendar",
                    "Tight Timeline",
                    "The platform needed to launch within 5 months to support a major company initiative.",
                ),
            ],
            process: vec![
                step(
                    "target",
                    "Stakeholder alignment",
                    "Facilitated workshops with key stakeholders to align on vision, goals, and success metrics.",
                ),
                step(
                    "users",
                    "User research & persona development",
                    "Conducted interviews with financial advisors to understand learning patterns and content needs.",
                ),
                step(
                    "layout",
                    "MVP Scoping",
                    "Defined a minimal viable product that delivered core value while meeting the deadline constraints.",
                ),
                step(
                    "git-branch",
                    "Agile Implementation",
                    "Led cross-functional teams using agile methodology to deliver features in priority order.",
                ),
            ],
            results: vec![
                outcome("96%", "Advisor Satisfaction Rate"),
                outcome("+78%", "Increase in Course Completions"),
                outcome("100%", "On-time Launch"),
            ],
            key_learnings: vec![
                learning(
                    "Improved Stakeholder Communication",
                    "Regular, structured communication with stakeholders prevented scope creep and maintained alignment.",
                ),
                learning(
                    "Content-First Approach",
                    "Focusing on content quality and structure before UI design led to better educational outcomes.",
                ),
                learning(
                    "Long-Term Planning",
                    "Balancing immediate needs with long-term platform scalability prevented future technical constraints.",
                ),
                learning(
                    "Cross-Functional Collaboration",
                    "Tight integration between product, design, and engineering teams improved solution quality and innovation.",
                ),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn builtin_ids_are_unique() {
        let data = FallbackData::builtin();
        let all = data.projects(&ProjectFilter::all());
        let ids: HashSet<_> = all.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), all.len());

        let cs_ids: HashSet<_> = data.case_studies().iter().map(|cs| cs.id).collect();
        assert_eq!(cs_ids.len(), data.case_studies().len());
    }

    #[test]
    fn every_builtin_case_study_references_a_builtin_project() {
        let data = FallbackData::builtin();
        for cs in data.case_studies() {
            assert!(data.project(cs.project_id).is_some(), "dangling {}", cs.project_id);
        }
        assert_eq!(data.case_studies().len(), 3);
    }

    #[test]
    fn case_studies_are_keyed_by_project() {
        let data = FallbackData::builtin();
        let cs = data.case_study_for_project(2).unwrap();
        assert_eq!(cs.client, "CAIS");
        assert!(data.case_study_for_project(99).is_none());
    }

    #[test]
    fn category_filter_applies_to_snapshot() {
        let data = FallbackData::builtin();
        let product = data.projects(&ProjectFilter::category("product"));
        assert_eq!(product.len(), 2);
        assert!(product.iter().all(|p| p.category == "product"));
        assert_eq!(data.projects(&ProjectFilter::category("all")).len(), 3);
    }

    #[test]
    fn dangling_case_studies_are_dropped() {
        let data = FallbackData::builtin();
        let mut orphan = data.case_study_for_project(1).unwrap();
        orphan.project_id = 42;
        let custom = FallbackData::new("test", data.projects(&ProjectFilter::all()), vec![orphan]);
        assert!(custom.case_studies().is_empty());
        assert_eq!(custom.version(), "test");
    }
}
