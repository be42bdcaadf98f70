// Job postings: public search, employer submission, admin moderation.
// A posting is created pending, becomes public only through approve, and
// reject deletes it outright.

pub mod handlers;
pub mod moderation;
pub mod query;
pub mod store;

/// Job types offered to employers on the posting form.
pub const STANDARD_JOB_TYPES: &[&str] = &[
    "Full-time",
    "Part-time",
    "Internship",
    "Contract",
    "Temporary",
    "Volunteer",
    "Remote",
];

/// Categories offered to employers on the posting form.
pub const STANDARD_CATEGORIES: &[&str] = &[
    "Technology",
    "Healthcare",
    "Business",
    "Education",
    "Arts",
    "Science",
    "Government",
];
