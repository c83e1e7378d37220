use std::fmt;
use std::marker::PhantomData;
use std::borrow::Borrow;
use ansi_term::Style;

/// Picks a style based on which interval a value falls in.
pub struct ColorByRange<T> {
    /// `(pivot, style)` pairs in decreasing order of pivot;
    /// a value uses the style of the first pivot it exceeds.
    pub divs: Vec<(T, Style)>,
    pub lowest: Style,
}

impl<T: PartialOrd> ColorByRange<T> {
    pub fn new(divs: Vec<(T, Style)>, lowest: Style) -> ColorByRange<T>
    { ColorByRange { divs, lowest } }

    pub fn style_of(&self, x: &T) -> Style {
        for &(ref pivot, style) in &self.divs {
            if x > pivot { return style; }
        }
        self.lowest
    }

    pub fn paint_as<D: fmt::Display>(&self, compared: &T, displayed: D) -> String
    { paint(self.style_of(compared), displayed).to_string() }
}

// hack for type inference issues
pub fn paint<T>(style: Style, value: T) -> Wrapper<T, T>
{ gpaint(style, value) }

pub fn gpaint<U, T>(style: Style, value: U) -> Wrapper<U, T>
{ Wrapper { style, value, _target: PhantomData } }

/// Colorizes `Display` output.
///
/// It has two parameters so that it can `borrow()` `U` as `T` when it wants to.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Wrapper<U, T=U> {
    style: Style,
    value: U,
    _target: PhantomData<T>,
}

impl<U, T> fmt::Display for Wrapper<U, T>
where
    U: Borrow<T>,
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.style.prefix())?;
        T::fmt(self.value.borrow(), f)?;
        write!(f, "{}", self.style.suffix())
    }
}
