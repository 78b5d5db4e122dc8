//! One-time seeding of an empty store.
//!
//! A fresh deployment gets a fixed set of projects and case studies so it is
//! browsable immediately. Seeding is guarded by an emptiness check on
//! projects, not by a unique constraint, so repeated runs are no-ops once any
//! project exists.

use portfolio_core::filter::ProjectFilter;
use portfolio_core::types::DbId;

use crate::error::StoreError;
use crate::models::case_study::{Challenge, CreateCaseStudy, KeyLearning, Outcome, ProcessStep};
use crate::models::project::CreateProject;
use crate::store::ContentStore;

/// Version tag of the seed set. Bump when the content changes.
pub const SEED_VERSION: &str = "2024.1";

/// What [`initialize_if_empty`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The store already held projects; nothing was written.
    AlreadyPopulated,
    /// The seed set was inserted.
    Seeded { projects: usize, case_studies: usize },
}

/// Case study builders keyed by the index of their project in
/// [`SeedSet::projects`].
pub type CaseStudyBuilder = fn(DbId) -> CreateCaseStudy;

/// The rows written into an empty store.
pub struct SeedSet {
    pub projects: Vec<CreateProject>,
    pub case_studies: Vec<(usize, CaseStudyBuilder)>,
}

impl SeedSet {
    /// The fixed content shipped with this version.
    pub fn builtin() -> Self {
        Self {
            projects: seed_projects(),
            case_studies: vec![(0, financial_app_case_study as CaseStudyBuilder)],
        }
    }

    /// Build the case studies from the ids the store assigned to the
    /// projects, in insertion order. Builders whose project is missing are
    /// skipped.
    pub fn case_studies_for(&self, project_ids: &[DbId]) -> Vec<CreateCaseStudy> {
        self.case_studies
            .iter()
            .filter_map(|(index, build)| project_ids.get(*index).map(|&id| build(id)))
            .collect()
    }
}

/// Insert the seed set if the store holds no projects.
///
/// The whole set is written through [`ContentStore::insert_seed`], which
/// either inserts every row or none, so a failed run leaves the store empty
/// and the next startup tries again. Errors are returned to the caller, which
/// decides whether they are fatal.
pub async fn initialize_if_empty(store: &dyn ContentStore) -> Result<SeedOutcome, StoreError> {
    let existing = store.list_projects(&ProjectFilter::all()).await?;
    if !existing.is_empty() {
        tracing::debug!(count = existing.len(), "Store already has projects, skipping seed");
        return Ok(SeedOutcome::AlreadyPopulated);
    }

    let outcome = store.insert_seed(&SeedSet::builtin()).await?;
    if let SeedOutcome::Seeded {
        projects,
        case_studies,
    } = outcome
    {
        tracing::info!(
            version = SEED_VERSION,
            projects,
            case_studies,
            "Seeded empty store",
        );
    }
    Ok(outcome)
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn project(
    title: &str,
    description: &str,
    category: &str,
    photo: &str,
    tags: &[&str],
) -> CreateProject {
    CreateProject {
        title: title.into(),
        description: description.into(),
        category: category.into(),
        image_src: format!(
            "https://images.unsplash.com/{photo}?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&h=600"
        ),
        tags: strings(tags),
    }
}

fn seed_projects() -> Vec<CreateProject> {
    vec![
        project(
            "Financial App Redesign",
            "UI/UX Design, Mobile App",
            "ui",
            "photo-1581291518633-83b4ebd1d83e",
            &["Figma", "Design System", "Prototyping"],
        ),
        project(
            "E-commerce Product Launch",
            "Product Management, Strategy",
            "product",
            "photo-1531403009284-440f080d1e12",
            &["Roadmapping", "Market Research", "A/B Testing"],
        ),
        project(
            "Streaming Service User Research",
            "UX Research, User Testing",
            "ux",
            "photo-1586717791821-3f44a563fa4c",
            &["User Interviews", "Usability Testing", "Heuristic Evaluation"],
        ),
        project(
            "Analytics Dashboard Redesign",
            "UI Design, Data Visualization",
            "ui",
            "photo-1551288049-bebda4e38f71",
            &["Adobe XD", "Information Architecture", "Data Viz"],
        ),
        project(
            "SaaS Product Strategy",
            "Product Management, Go-to-market",
            "product",
            "photo-1542744173-8e7e53415bb0",
            &["Product Strategy", "OKRs", "User Stories"],
        ),
        project(
            "Health App User Experience",
            "UX Design, Wireframing",
            "ux",
            "photo-1559028012-481c04fa702d",
            &["User Flows", "Information Architecture", "Accessibility"],
        ),
    ]
}

fn financial_app_case_study(project_id: DbId) -> CreateCaseStudy {
    CreateCaseStudy {
        project_id,
        client: "FinTech Solutions Inc.".into(),
        timeline: "3 months".into(),
        role: "Lead UI/UX Designer".into(),
        tools: strings(&["Figma", "Design System", "Prototyping"]),
        overview: "The client approached me to redesign their financial management app to improve user engagement and satisfaction. The existing app had poor user retention and satisfaction scores, despite offering valuable financial tools. I was tasked with completely reimagining the user experience while maintaining the core functionality that users valued, with a focus on making financial data more accessible and actionable.".into(),
        challenges: vec![
            Challenge {
                icon: "chart-line".into(),
                title: "Complex Data Visualization".into(),
                description: "Financial data needed to be presented in an intuitive way without losing important details.".into(),
            },
            Challenge {
                icon: "users".into(),
                title: "Diverse User Base".into(),
                description: "Users ranged from financial novices to experts, requiring an interface that worked for both.".into(),
            },
            Challenge {
                icon: "shield-alt".into(),
                title: "Security Concerns".into(),
                description: "Balancing ease of use with appropriate security measures for sensitive financial data.".into(),
            },
        ],
        process: vec![
            ProcessStep {
                icon: "search".into(),
                title: "Research & Discovery".into(),
                description: "Conducted user interviews, competitive analysis, and usability testing on the existing app to identify pain points and opportunities. Key findings showed users struggled with navigation, understanding their financial status at a glance, and found the transaction history difficult to parse.".into(),
            },
            ProcessStep {
                icon: "pencil-ruler".into(),
                title: "UX Design & Wireframing".into(),
                description: "Created user flows, information architecture, and wireframes focusing on simplifying navigation and making key information accessible. Implemented a new dashboard approach with customizable widgets and a simplified navigation system.".into(),
            },
            ProcessStep {
                icon: "paint-brush".into(),
                title: "UI Design & Prototyping".into(),
                description: "Developed a clean, professional visual design system with accessible color schemes and typography that improved readability of financial data. Created interactive prototypes for testing key user flows and gathering feedback before implementation.".into(),
            },
            ProcessStep {
                icon: "check-circle".into(),
                title: "Testing & Iteration".into(),
                description: "Conducted usability testing with diverse user groups to validate design decisions and identify areas for improvement. Iterated based on user feedback, particularly improving transaction filtering and categorization features.".into(),
            },
        ],
        results: vec![
            Outcome {
                metric: "+42%".into(),
                description: "Increase in Daily Active Users".into(),
            },
            Outcome {
                metric: "+38%".into(),
                description: "Improvement in User Satisfaction".into(),
            },
            Outcome {
                metric: "-24%".into(),
                description: "Reduction in Support Tickets".into(),
            },
        ],
        key_learnings: vec![
            KeyLearning {
                title: "Simplicity With Depth".into(),
                description: "Balancing simplicity with depth of functionality matters most for complex data, presenting financial information accessibly while keeping accuracy and detail for power users.".into(),
            },
            KeyLearning {
                title: "Feasible Design".into(),
                description: "Working closely with the client's development team produced designs that were both visually strong and technically feasible within their constraints.".into(),
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_case_studies_point_at_existing_seed_projects() {
        let seed = SeedSet::builtin();
        for (index, _) in &seed.case_studies {
            assert!(*index < seed.projects.len());
        }
    }

    #[test]
    fn case_studies_follow_assigned_ids() {
        let seed = SeedSet::builtin();
        let ids: Vec<DbId> = (100..106).collect();
        let built = seed.case_studies_for(&ids);
        assert_eq!(built.len(), 1);
        assert_eq!(built[0].project_id, 100);
        assert!(seed.case_studies_for(&[]).is_empty());
    }

    #[test]
    fn builder_uses_the_given_project_id() {
        let cs = financial_app_case_study(41);
        assert_eq!(cs.project_id, 41);
    }
}
