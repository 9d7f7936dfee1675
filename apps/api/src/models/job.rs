use serde::{Deserialize, Deserializer, Serialize};

/// A single job posting as loaded from the catalog source.
///
/// Every field except `id` has a defined default so that sparse records
/// deserialize once at load time instead of being probed at every access site.
/// An explicit `null` counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobPosting {
    #[serde(default = "missing_id", deserialize_with = "null_as_missing_id")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub company: String,
    #[serde(deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(deserialize_with = "null_as_default")]
    pub remote_option: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub salary_min: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub salary_max: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub required_skills: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub preferred_skills: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub experience_level: String,
    #[serde(deserialize_with = "null_as_default")]
    pub company_size: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
}

/// Records without an id get a sentinel; the catalog skips them.
pub const MISSING_ID: i64 = i64::MIN;

fn missing_id() -> i64 {
    MISSING_ID
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn null_as_missing_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<i64>::deserialize(deserializer).map(|id| id.unwrap_or(MISSING_ID))
}

impl JobPosting {
    /// Text indexed for relevance: title, required then preferred skills, description.
    pub fn document_text(&self) -> String {
        let skills = self
            .required_skills
            .iter()
            .chain(self.preferred_skills.iter())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ");
        format!("{} {} {}", self.title, skills, self.description).to_lowercase()
    }
}

/// A scored job for one match request. Borrows the posting from the live catalog.
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult<'a> {
    pub job: &'a JobPosting,
    pub match_score: f64, // 0 – 100, one decimal
    pub matching_skills: Vec<String>,
    pub total_required: usize,
    pub explanation: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_record_gets_defaults() {
        let job: JobPosting = serde_json::from_str(r#"{"id": 7, "title": "Data Scientist"}"#).unwrap();
        assert_eq!(job.id, 7);
        assert_eq!(job.title, "Data Scientist");
        assert!(job.location.is_empty());
        assert!(!job.remote_option);
        assert_eq!(job.salary_min, 0);
        assert!(job.required_skills.is_empty());
    }

    #[test]
    fn test_missing_id_uses_sentinel() {
        let job: JobPosting = serde_json::from_str(r#"{"title": "DevOps Engineer"}"#).unwrap();
        assert_eq!(job.id, MISSING_ID);
    }

    #[test]
    fn test_null_fields_get_defaults() {
        let json = r#"{
            "id": 4,
            "title": "DevOps Engineer",
            "location": null,
            "remote_option": null,
            "salary_min": null,
            "required_skills": null,
            "description": null
        }"#;
        let job: JobPosting = serde_json::from_str(json).unwrap();
        assert_eq!(job.title, "DevOps Engineer");
        assert!(job.location.is_empty());
        assert!(!job.remote_option);
        assert_eq!(job.salary_min, 0);
        assert!(job.required_skills.is_empty());
        assert!(job.description.is_empty());
    }

    #[test]
    fn test_null_id_uses_sentinel() {
        let job: JobPosting = serde_json::from_str(r#"{"id": null, "title": "QA"}"#).unwrap();
        assert_eq!(job.id, MISSING_ID);
    }

    #[test]
    fn test_full_record_deserializes() {
        let json = r#"{
            "id": 1,
            "title": "Frontend Developer",
            "company": "TechCorp Inc",
            "location": "San Francisco, CA",
            "remote_option": true,
            "salary_min": 90000,
            "salary_max": 120000,
            "required_skills": ["React", "JavaScript", "CSS", "HTML"],
            "preferred_skills": ["TypeScript", "Node.js"],
            "experience_level": "Mid",
            "company_size": "50-200",
            "description": "Build responsive web applications using React"
        }"#;
        let job: JobPosting = serde_json::from_str(json).unwrap();
        assert!(job.remote_option);
        assert_eq!(job.salary_max, 120000);
        assert_eq!(job.required_skills.len(), 4);
        assert_eq!(job.preferred_skills[1], "Node.js");
        assert_eq!(job.company_size, "50-200");
    }

    #[test]
    fn test_document_text_order_and_case() {
        let job = JobPosting {
            id: 1,
            title: "Backend Developer".to_string(),
            required_skills: vec!["Python".to_string(), "SQL".to_string()],
            preferred_skills: vec!["Docker".to_string()],
            description: "Build APIs".to_string(),
            ..Default::default()
        };
        assert_eq!(
            job.document_text(),
            "backend developer python sql docker build apis"
        );
    }
}
