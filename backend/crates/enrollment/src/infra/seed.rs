//! Default course catalog written on first run

use crate::domain::value_objects::CourseDraft;

fn draft(name: &str, price: f64, duration: &str, is_free_trial: bool, is_charity: bool) -> CourseDraft {
    CourseDraft {
        name: name.to_string(),
        price,
        duration: duration.to_string(),
        syllabus: String::new(),
        is_free_trial,
        is_charity,
    }
}

pub fn default_courses() -> Vec<CourseDraft> {
    vec![
        draft("Year 8 - Maths", 15.0, "1 Hour", true, false),
        draft("Year 9 - Maths", 15.0, "1 Hour", true, false),
        draft("Year 10 - Maths", 15.0, "1 Hour", true, false),
        draft("Winner Kingdom (Year 8-11)", 0.0, "Sat Only", false, true),
    ]
}
