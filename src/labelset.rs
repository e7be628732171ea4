use std::{collections::BTreeSet, fmt::Debug, hash::Hash};

use itertools::Itertools;

use crate::Show;

/// A label set abstracts the collection of labels that may appear on the transitions of an
/// automaton. Besides the ordinary labels, every label set has a *special* label, which is
/// reserved for the transitions leaving the `pre` state and entering the `post` state (i.e. the
/// ones carrying initial and final weights).
///
/// Some label sets admit a spontaneous label (also called identity, empty word or `\e`), which
/// can be traversed without consuming input. Whether this is the case is a static property
/// ([`LabelSet::HAS_ONE`]), on which the removal of spontaneous transitions dispatches: if there
/// is no spontaneous label, every automaton is trivially proper.
pub trait LabelSet: Clone + Debug + PartialEq {
    /// The type of labels in this label set.
    type Label: Clone + Eq + Hash + Ord + Debug + Show;

    /// Whether this label set has a spontaneous label.
    const HAS_ONE: bool;

    /// Returns the spontaneous label if it exists.
    fn one(&self) -> Option<Self::Label>;

    /// Checks whether `label` is the spontaneous label.
    fn is_one(&self, label: &Self::Label) -> bool;

    /// Returns the label that is used on transitions from `pre` and to `post`.
    fn special(&self) -> Self::Label;

    /// Checks whether `label` is the special label.
    fn is_special(&self, label: &Self::Label) -> bool;

    /// Returns true if `label` may appear on a transition between two ordinary states.
    fn contains(&self, label: &Self::Label) -> bool;

    /// Turns a single input character into a label, if it belongs to the label set.
    fn letter(&self, c: char) -> Option<Self::Label>;

    /// The label to use when reading a transition backwards. Single letters are their own
    /// transposition.
    fn transpose(&self, label: &Self::Label) -> Self::Label {
        label.clone()
    }

    /// A short human readable description of the label set, e.g. `lal_char(ab)`.
    fn name(&self) -> String;
}

/// Label of the character based label sets [`LetterSet`] and [`NullableSet`].
#[derive(Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum Letter {
    /// Reserved for initial and final transitions.
    Special,
    /// The spontaneous label.
    One,
    /// An ordinary letter.
    Char(char),
}

impl Letter {
    /// Returns the character if `self` is an ordinary letter.
    pub fn as_char(&self) -> Option<char> {
        match self {
            Letter::Char(c) => Some(*c),
            _ => None,
        }
    }
}

impl From<char> for Letter {
    fn from(value: char) -> Self {
        Letter::Char(value)
    }
}

impl Show for Letter {
    fn show(&self) -> String {
        match self {
            Letter::Special => "$".to_string(),
            Letter::One => "\\e".to_string(),
            Letter::Char(c) => c.to_string(),
        }
    }
}

fn letters_of_size(size: usize) -> BTreeSet<char> {
    assert!(size <= 26, "Alphabet is too large");
    (0..size).map(|i| (b'a' + i as u8) as char).collect()
}

/// Labels are letters: a finite set of characters without spontaneous label. Automata over
/// such a label set are always proper.
#[derive(Clone, Hash, PartialEq, Eq, Debug, Default)]
pub struct LetterSet(BTreeSet<char>);

impl LetterSet {
    /// Creates a new [`LetterSet`] of the given size. The letters are just the first `size`
    /// letters of the alphabet, i.e. 'a' to 'z'.
    pub fn of_size(size: usize) -> Self {
        Self(letters_of_size(size))
    }

    /// Returns an iterator over the letters in ascending order.
    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.0.iter().copied()
    }

    /// Returns the number of letters.
    pub fn size(&self) -> usize {
        self.0.len()
    }
}

impl FromIterator<char> for LetterSet {
    fn from_iter<T: IntoIterator<Item = char>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl LabelSet for LetterSet {
    type Label = Letter;

    const HAS_ONE: bool = false;

    fn one(&self) -> Option<Letter> {
        None
    }

    fn is_one(&self, _label: &Letter) -> bool {
        false
    }

    fn special(&self) -> Letter {
        Letter::Special
    }

    fn is_special(&self, label: &Letter) -> bool {
        matches!(label, Letter::Special)
    }

    fn contains(&self, label: &Letter) -> bool {
        label.as_char().is_some_and(|c| self.0.contains(&c))
    }

    fn letter(&self, c: char) -> Option<Letter> {
        self.0.contains(&c).then_some(Letter::Char(c))
    }

    fn name(&self) -> String {
        format!("lal_char({})", self.0.iter().join(""))
    }
}

/// Labels are nullable letters: a finite set of characters together with the spontaneous
/// label `\e`.
#[derive(Clone, Hash, PartialEq, Eq, Debug, Default)]
pub struct NullableSet(BTreeSet<char>);

impl NullableSet {
    /// Creates a new [`NullableSet`] whose letters are the first `size` letters of the alphabet.
    pub fn of_size(size: usize) -> Self {
        Self(letters_of_size(size))
    }

    /// Returns an iterator over the letters (excluding `\e`) in ascending order.
    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.0.iter().copied()
    }

    /// Returns the number of letters, `\e` is not counted.
    pub fn size(&self) -> usize {
        self.0.len()
    }
}

impl FromIterator<char> for NullableSet {
    fn from_iter<T: IntoIterator<Item = char>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl LabelSet for NullableSet {
    type Label = Letter;

    const HAS_ONE: bool = true;

    fn one(&self) -> Option<Letter> {
        Some(Letter::One)
    }

    fn is_one(&self, label: &Letter) -> bool {
        matches!(label, Letter::One)
    }

    fn special(&self) -> Letter {
        Letter::Special
    }

    fn is_special(&self, label: &Letter) -> bool {
        matches!(label, Letter::Special)
    }

    fn contains(&self, label: &Letter) -> bool {
        match label {
            Letter::Special => false,
            Letter::One => true,
            Letter::Char(c) => self.0.contains(c),
        }
    }

    fn letter(&self, c: char) -> Option<Letter> {
        self.0.contains(&c).then_some(Letter::Char(c))
    }

    fn name(&self) -> String {
        format!("lan_char({})", self.0.iter().join(""))
    }
}
