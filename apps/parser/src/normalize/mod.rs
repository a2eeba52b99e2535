//! Normalizers: dates, degrees, skill tokens and description text.
//!
//! Each function is pure and idempotent.

pub mod dates;
pub mod degree;
pub mod description;
pub mod skills;

pub use dates::{is_ongoing, normalize_date};
pub use degree::canonicalize_degree;
pub use description::{clean_description, render_html};
pub use skills::{normalize_skills, standardize_skill, MAX_SKILLS};
