//! Case study entity model and DTOs.
//!
//! The narrative sections (`challenges`, `process`, `results`,
//! `key_learnings`) are stored as JSON columns but typed here as records, so
//! a malformed row fails to decode instead of leaking arbitrary JSON.

use portfolio_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A problem the engagement had to solve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    pub icon: String,
    pub title: String,
    pub description: String,
}

/// One phase of the work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessStep {
    pub icon: String,
    pub title: String,
    pub description: String,
}

/// A measured result, e.g. `+42%` / `Increase in Daily Active Users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub metric: String,
    pub description: String,
}

/// A takeaway from the engagement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyLearning {
    pub title: String,
    pub description: String,
}

/// A case study row from the `case_studies` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseStudy {
    pub id: DbId,
    pub project_id: DbId,
    pub client: String,
    pub timeline: String,
    pub role: String,
    pub tools: Vec<String>,
    pub overview: String,
    #[sqlx(json)]
    pub challenges: Vec<Challenge>,
    #[sqlx(json)]
    pub process: Vec<ProcessStep>,
    #[sqlx(json)]
    pub results: Vec<Outcome>,
    #[sqlx(json)]
    pub key_learnings: Vec<KeyLearning>,
}

/// DTO for creating a new case study.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCaseStudy {
    pub project_id: DbId,
    pub client: String,
    pub timeline: String,
    pub role: String,
    #[serde(default)]
    pub tools: Vec<String>,
    pub overview: String,
    pub challenges: Vec<Challenge>,
    pub process: Vec<ProcessStep>,
    pub results: Vec<Outcome>,
    pub key_learnings: Vec<KeyLearning>,
}

impl CreateCaseStudy {
    /// Materialize the DTO as a stored entity with the assigned id.
    pub fn into_case_study(self, id: DbId) -> CaseStudy {
        CaseStudy {
            id,
            project_id: self.project_id,
            client: self.client,
            timeline: self.timeline,
            role: self.role,
            tools: self.tools,
            overview: self.overview,
            challenges: self.challenges,
            process: self.process,
            results: self.results,
            key_learnings: self.key_learnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case_study_json(key_learnings: serde_json::Value) -> serde_json::Value {
        serde_json::json!({
            "id": 1,
            "projectId": 7,
            "client": "Acme",
            "timeline": "3 months",
            "role": "Designer",
            "tools": ["Figma"],
            "overview": "Overview",
            "challenges": [{"icon": "users", "title": "T", "description": "D"}],
            "process": [],
            "results": [{"metric": "+10%", "description": "Growth"}],
            "keyLearnings": key_learnings,
        })
    }

    #[test]
    fn deserializes_structured_sections() {
        let json = case_study_json(serde_json::json!([
            {"title": "Iterate", "description": "Test early."}
        ]));
        let cs: CaseStudy = serde_json::from_value(json).unwrap();
        assert_eq!(cs.key_learnings[0].title, "Iterate");
        assert_eq!(cs.project_id, 7);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = case_study_json(serde_json::json!([]));
        let cs: CaseStudy = serde_json::from_value(json).unwrap();
        let out = serde_json::to_value(&cs).unwrap();
        assert_eq!(out["projectId"], 7);
        assert!(out["keyLearnings"].is_array());
        assert!(out.get("project_id").is_none());
    }
}
