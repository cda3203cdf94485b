/// The read-only projection the engine hands to a display layer.

use serde::Serialize;

use crate::schema::scene::SceneId;
use crate::schema::world::WorldState;

/// One selectable option, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceView {
    pub index: usize,
    pub label: String,
}

/// Everything a host needs to render the current scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct View {
    pub scene: SceneId,
    /// Consequence narration of the choice that led here, if any.
    pub outcome: Option<String>,
    pub text: String,
    pub choices: Vec<ChoiceView>,
    /// The host should prompt for a name and call `initialize`.
    pub awaiting_name: bool,
    pub state: WorldState,
}

impl View {
    /// Label of the choice at `index`, if it exists.
    pub fn choice_label(&self, index: usize) -> Option<&str> {
        self.choices.get(index).map(|c| c.label.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choice_label_lookup() {
        let view = View {
            scene: SceneId::from("start"),
            outcome: None,
            text: "The void.".to_string(),
            choices: vec![ChoiceView {
                index: 0,
                label: "Begin Creation".to_string(),
            }],
            awaiting_name: false,
            state: WorldState::default(),
        };
        assert_eq!(view.choice_label(0), Some("Begin Creation"));
        assert_eq!(view.choice_label(1), None);
    }
}
