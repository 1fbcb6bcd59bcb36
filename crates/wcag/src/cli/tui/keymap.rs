use super::app::{App, InputFocus};
use super::components::action_bar::ActionHint;

fn ordered_hints(items: &[(&'static str, &'static str)]) -> Vec<ActionHint> {
    let mut priority: i16 = 100;
    items
        .iter()
        .map(|(key, label)| {
            let hint = ActionHint::new(*key, *label, priority.max(1) as u8);
            priority -= 5;
            hint
        })
        .collect()
}

pub fn search_actions() -> Vec<ActionHint> {
    ordered_hints(&[
        ("Enter", "Next match"),
        ("Shift+Enter", "Previous"),
        ("Ctrl+T", "Toggle"),
        ("PgUp/PgDn", "Page"),
        ("Home/End", "First/Last"),
        ("Esc", "Clear"),
        ("Tab", "List"),
        ("F1", "Help"),
    ])
}

pub fn list_actions() -> Vec<ActionHint> {
    ordered_hints(&[
        ("Space", "Toggle"),
        ("1/2/3", "A/AA/AAA"),
        ("/", "Search"),
        ("a", "Check visible"),
        ("u", "Uncheck all"),
        ("e", "Export"),
        ("i", "Import"),
        ("t", "Theme"),
        ("?", "Help"),
        ("q", "Quit"),
    ])
}

fn prompt_actions() -> Vec<ActionHint> {
    ordered_hints(&[("Enter", "Confirm"), ("Esc", "Cancel")])
}

pub fn actions_for(app: &App) -> Vec<ActionHint> {
    if app.prompt.is_some() {
        return prompt_actions();
    }
    match app.focus {
        InputFocus::Search => search_actions(),
        InputFocus::List => list_actions(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priorities_descend() {
        let hints = list_actions();
        assert!(hints.windows(2).all(|pair| pair[0].priority > pair[1].priority));
        assert_eq!(hints[0].key, "Space");
    }
}
