use page_port::ElementId;

/// Strategy for choosing the "most recent" option among a menu's clickable
/// candidates, in DOM order.
///
/// Option labels are localized and cannot be matched on, so the default
/// picker is positional: the platform consistently renders a two-option
/// {relevance, recency} menu, making index 1 the recency option. That layout
/// is an assumption about the current platform, not a guaranteed contract;
/// swapping the picker does not touch the stage runner.
pub trait OptionPicker: Send + Sync {
    fn pick(&self, options: &[ElementId]) -> Option<ElementId>;
}

#[derive(Clone, Copy, Debug)]
pub struct PositionalPicker {
    pub index: usize,
}

impl Default for PositionalPicker {
    fn default() -> Self {
        Self { index: 1 }
    }
}

impl OptionPicker for PositionalPicker {
    fn pick(&self, options: &[ElementId]) -> Option<ElementId> {
        options.get(self.index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_picker_needs_enough_options() {
        let picker = PositionalPicker::default();
        assert_eq!(picker.pick(&[ElementId(7)]), None);
        assert_eq!(
            picker.pick(&[ElementId(7), ElementId(8), ElementId(9)]),
            Some(ElementId(8))
        );
    }
}
