use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

/// Every message the application can flash. Redirects carry only the code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeCode {
    FeedbackSubmitted,
    FeedbackFailed,
    JobsLoadFailed,
    JobPosted,
    JobPostFailed,
    JobApproved,
    JobApproveFailed,
    JobRejected,
    JobRejectFailed,
    JobNotFound,
    PendingLoadFailed,
    RecommendationSubmitted,
    RecommendationFailed,
    RecommendationsLoadFailed,
    ApplicationSubmitted,
    ApplicationsLoadFailed,
    InvalidRole,
}

impl NoticeCode {
    const ALL: [NoticeCode; 17] = [
        NoticeCode::FeedbackSubmitted,
        NoticeCode::FeedbackFailed,
        NoticeCode::JobsLoadFailed,
        NoticeCode::JobPosted,
        NoticeCode::JobPostFailed,
        NoticeCode::JobApproved,
        NoticeCode::JobApproveFailed,
        NoticeCode::JobRejected,
        NoticeCode::JobRejectFailed,
        NoticeCode::JobNotFound,
        NoticeCode::PendingLoadFailed,
        NoticeCode::RecommendationSubmitted,
        NoticeCode::RecommendationFailed,
        NoticeCode::RecommendationsLoadFailed,
        NoticeCode::ApplicationSubmitted,
        NoticeCode::ApplicationsLoadFailed,
        NoticeCode::InvalidRole,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NoticeCode::FeedbackSubmitted => "feedback_submitted",
            NoticeCode::FeedbackFailed => "feedback_failed",
            NoticeCode::JobsLoadFailed => "jobs_load_failed",
            NoticeCode::JobPosted => "job_posted",
            NoticeCode::JobPostFailed => "job_post_failed",
            NoticeCode::JobApproved => "job_approved",
            NoticeCode::JobApproveFailed => "job_approve_failed",
            NoticeCode::JobRejected => "job_rejected",
            NoticeCode::JobRejectFailed => "job_reject_failed",
            NoticeCode::JobNotFound => "job_not_found",
            NoticeCode::PendingLoadFailed => "pending_load_failed",
            NoticeCode::RecommendationSubmitted => "recommendation_submitted",
            NoticeCode::RecommendationFailed => "recommendation_failed",
            NoticeCode::RecommendationsLoadFailed => "recommendations_load_failed",
            NoticeCode::ApplicationSubmitted => "application_submitted",
            NoticeCode::ApplicationsLoadFailed => "applications_load_failed",
            NoticeCode::InvalidRole => "invalid_role",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == code)
    }

    pub fn level(self) -> NoticeLevel {
        match self {
            NoticeCode::FeedbackSubmitted
            | NoticeCode::JobPosted
            | NoticeCode::JobApproved
            | NoticeCode::JobRejected
            | NoticeCode::RecommendationSubmitted
            | NoticeCode::ApplicationSubmitted => NoticeLevel::Success,
            NoticeCode::JobNotFound => NoticeLevel::Warning,
            _ => NoticeLevel::Error,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            NoticeCode::FeedbackSubmitted => "Thank you for your feedback!",
            NoticeCode::FeedbackFailed => "Error submitting feedback",
            NoticeCode::JobsLoadFailed => "Error loading jobs",
            NoticeCode::JobPosted => "Job posted successfully! Waiting for admin approval.",
            NoticeCode::JobPostFailed => "Error posting job",
            NoticeCode::JobApproved => "Job approved successfully!",
            NoticeCode::JobApproveFailed => "Error approving job",
            NoticeCode::JobRejected => "Job rejected successfully!",
            NoticeCode::JobRejectFailed => "Error rejecting job",
            NoticeCode::JobNotFound => "Job not found",
            NoticeCode::PendingLoadFailed => "Error loading pending jobs",
            NoticeCode::RecommendationSubmitted => "Recommendation request submitted!",
            NoticeCode::RecommendationFailed => "Error submitting recommendation request",
            NoticeCode::RecommendationsLoadFailed => "Error loading recommendation requests",
            NoticeCode::ApplicationSubmitted => "Application submitted!",
            NoticeCode::ApplicationsLoadFailed => "Error loading applications",
            NoticeCode::InvalidRole => "Invalid role selected",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub code: &'static str,
    pub level: NoticeLevel,
    pub message: &'static str,
}

impl From<NoticeCode> for Notice {
    fn from(code: NoticeCode) -> Self {
        Notice {
            code: code.as_str(),
            level: code.level(),
            message: code.message(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_unique() {
        for (i, a) in NoticeCode::ALL.iter().enumerate() {
            for b in &NoticeCode::ALL[i + 1..] {
                assert_ne!(a.as_str(), b.as_str());
            }
        }
    }

    #[test]
    fn test_every_code_parses_back() {
        for code in NoticeCode::ALL {
            assert_eq!(NoticeCode::from_code(code.as_str()), Some(code));
        }
    }

    #[test]
    fn test_levels() {
        assert_eq!(NoticeCode::JobApproved.level(), NoticeLevel::Success);
        assert_eq!(NoticeCode::JobNotFound.level(), NoticeLevel::Warning);
        assert_eq!(NoticeCode::InvalidRole.level(), NoticeLevel::Error);
    }
}
