//! Class selection and class eligibility

use loadout_items::{Class, ClassMask};

/// Most classes a player may select at once
pub const MAX_SELECTED_CLASSES: usize = 3;

/// The 1–3 classes the player is planning for, in selection order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedClasses {
    classes: Vec<Class>,
}

impl Default for SelectedClasses {
    fn default() -> Self {
        Self::new(Class::Magician)
    }
}

impl SelectedClasses {
    /// Selection holding a single class
    pub fn new(class: Class) -> Self {
        Self {
            classes: vec![class],
        }
    }

    /// Build from a list, dropping duplicates and anything past the third
    /// class. Returns `None` for an empty list.
    pub fn from_classes(classes: impl IntoIterator<Item = Class>) -> Option<Self> {
        let mut selected: Vec<Class> = Vec::with_capacity(MAX_SELECTED_CLASSES);
        for class in classes {
            if selected.len() == MAX_SELECTED_CLASSES {
                break;
            }
            if !selected.contains(&class) {
                selected.push(class);
            }
        }
        if selected.is_empty() {
            None
        } else {
            Some(Self { classes: selected })
        }
    }

    /// Add or remove a class. Adding is refused once three are selected and
    /// removing is refused for the last class. Returns whether it changed.
    pub fn toggle(&mut self, class: Class) -> bool {
        if let Some(pos) = self.classes.iter().position(|&c| c == class) {
            if self.classes.len() == 1 {
                return false;
            }
            self.classes.remove(pos);
            true
        } else if self.classes.len() < MAX_SELECTED_CLASSES {
            self.classes.push(class);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, class: Class) -> bool {
        self.classes.contains(&class)
    }

    pub fn classes(&self) -> &[Class] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Always false; a selection holds at least one class.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Whether another class can still be added
    pub fn is_full(&self) -> bool {
        self.classes.len() >= MAX_SELECTED_CLASSES
    }

    /// Union of the selected class bits
    pub fn mask(&self) -> ClassMask {
        self.classes
            .iter()
            .fold(ClassMask::empty(), |acc, class| acc | class.bit())
    }
}

/// Whether any selected class may use an item restricted to `mask`.
pub fn is_eligible(selected: &SelectedClasses, mask: ClassMask) -> bool {
    if mask == ClassMask::ALL {
        return true;
    }
    mask.intersects(selected.mask())
}
