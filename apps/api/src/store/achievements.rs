//! Achievement list editing shared by experiences and educations.
//!
//! The list always keeps at least one slot so the editor has a field to type into.
//! Out-of-range indices are ignored, like unknown entry ids.

pub fn add(achievements: &mut Vec<String>) {
    achievements.push(String::new());
}

/// Replaces the text at `index`, then drops trailing empty slots beyond the first.
pub fn set(achievements: &mut Vec<String>, index: usize, text: String) {
    let Some(slot) = achievements.get_mut(index) else {
        return;
    };
    *slot = text;
    while achievements.len() > 1 && achievements.last().is_some_and(|a| a.is_empty()) {
        achievements.pop();
    }
}

/// Removes the slot at `index`. Removing the last remaining slot leaves one empty placeholder.
pub fn remove(achievements: &mut Vec<String>, index: usize) {
    if index < achievements.len() {
        achievements.remove(index);
    }
    if achievements.is_empty() {
        achievements.push(String::new());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_add_appends_empty_slot() {
        let mut a = list(&["one"]);
        add(&mut a);
        assert_eq!(a, list(&["one", ""]));
    }

    #[test]
    fn test_set_prunes_trailing_empties() {
        let mut a = list(&["one", "", "three"]);
        set(&mut a, 2, String::new());
        assert_eq!(a, list(&["one"]));
    }

    #[test]
    fn test_set_keeps_single_empty_slot() {
        let mut a = list(&["only"]);
        set(&mut a, 0, String::new());
        assert_eq!(a, list(&[""]));
    }

    #[test]
    fn test_set_keeps_interior_empties() {
        let mut a = list(&["one", "", "three"]);
        set(&mut a, 0, "first".to_string());
        assert_eq!(a, list(&["first", "", "three"]));
    }

    #[test]
    fn test_set_out_of_range_is_noop() {
        let mut a = list(&["one", ""]);
        set(&mut a, 5, "x".to_string());
        assert_eq!(a, list(&["one", ""]));
    }

    #[test]
    fn test_remove_last_leaves_placeholder() {
        let mut a = list(&["only"]);
        remove(&mut a, 0);
        assert_eq!(a, list(&[""]));
    }

    #[test]
    fn test_remove_never_empties_list() {
        let mut a = list(&["a", "b", "c"]);
        for _ in 0..5 {
            remove(&mut a, 0);
            assert!(!a.is_empty());
        }
        assert_eq!(a, list(&[""]));
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let mut a = list(&["a", "b"]);
        remove(&mut a, 2);
        assert_eq!(a, list(&["a", "b"]));
    }
}
