//! Inline declaration blocks (`background-color: ...; opacity: ...`).

use std::collections::HashMap;

use anyhow::{Context, Result, bail};

use crate::engine::bridge::StyleProperty;

/// Declarations of one element, keyed by lowercase property name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Declarations {
    values: HashMap<String, String>,
    z_index: Option<i32>,
}

impl Declarations {
    pub fn parse(text: &str) -> Result<Self> {
        let mut decls = Declarations::default();
        decls.merge(text)?;
        Ok(decls)
    }

    /// Later declarations override earlier ones. Nothing is applied unless
    /// the whole block parses.
    pub fn merge(&mut self, text: &str) -> Result<()> {
        let mut values = Vec::new();
        let mut z_index = None;

        for decl in text.split(';') {
            let decl = decl.trim();
            if decl.is_empty() {
                continue;
            }

            let Some((name, value)) = decl.split_once(':') else {
                bail!("declaration `{decl}` has no value");
            };
            let name = name.trim().to_ascii_lowercase();
            let value = value.trim();
            if value.is_empty() {
                bail!("declaration `{name}` has an empty value");
            }

            if name == "z-index" {
                z_index = Some(if value.eq_ignore_ascii_case("auto") {
                    None
                } else {
                    Some(
                        value
                            .parse::<i32>()
                            .with_context(|| format!("invalid z-index `{value}`"))?,
                    )
                });
                continue;
            }

            if StyleProperty::from_css_name(&name).is_none() {
                bail!("unsupported property `{name}`");
            }
            values.push((name, value.to_string()));
        }

        self.values.extend(values);
        if let Some(z) = z_index {
            self.z_index = z;
        }
        Ok(())
    }

    pub fn get(&self, property: StyleProperty) -> Option<&str> {
        self.values.get(property.css_name()).map(String::as_str)
    }

    /// Specified value, or the CSS initial value.
    pub fn computed(&self, property: StyleProperty) -> &str {
        self.get(property).unwrap_or(property.initial_value())
    }

    pub fn z_index(&self) -> Option<i32> {
        self.z_index
    }
}
