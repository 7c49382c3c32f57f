#![forbid(unsafe_code)]

//! Style hooks and resolution for panelkit.
//!
//! # Role in panelkit
//! Layout and chrome code never assigns colors, borders or fonts. Instead each
//! chrome, bar and scroll region carries [`StyleHooks`]: a stable identity
//! string plus named attributes such as `panelVariant=table` or
//! `hiddenScrollbar=true`. A host-provided [`StyleResolver`] turns hooks into
//! appearance; [`StyleSheet`] is the reference resolver.
//!
//! # This crate provides
//! - [`StyleHooks`] and [`AttrValue`], plus the attribute names in [`attr`].
//! - [`StyleResolver`], the read-only service injected at page construction.
//! - [`StyleSheet`] with [`Selector`] matching and specificity ordering.
//! - [`Tokens`]: spacing, grid and bar metrics shared by layout code.

pub mod hooks;
pub mod stylesheet;
pub mod tokens;

pub use hooks::{AttrValue, StyleHooks, attr};
pub use stylesheet::{ResolvedStyle, Selector, StyleResolver, StyleSheet};
pub use tokens::{BarHeights, Tokens};
