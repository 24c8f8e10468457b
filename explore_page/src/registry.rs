// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The set of explorable components and their grid layout on the canvas.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};

/// One renderable example of a component.
#[derive(Clone, Debug, PartialEq)]
pub struct ExampleCard {
    /// Label shown above the example.
    pub label: String,
    /// Laid-out height of the example content; width comes from [`GridMetrics::card_width`].
    pub height: f64,
}

impl ExampleCard {
    /// Creates an example card.
    #[must_use]
    pub fn new(label: impl Into<String>, height: f64) -> Self {
        Self {
            label: label.into(),
            height,
        }
    }
}

/// A documented component and its examples.
#[derive(Clone, Debug, PartialEq)]
pub struct ComponentEntry {
    /// Component name.
    pub name: String,
    /// Examples, in documentation order.
    pub examples: Vec<ExampleCard>,
}

/// Identifies one example card: component index, then example index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardId {
    /// Index into [`CardRegistry::components`].
    pub component: usize,
    /// Index into that component's examples.
    pub example: usize,
}

/// Spacing used to lay the registry out on the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridMetrics {
    /// Width of every example card.
    pub card_width: f64,
    /// Examples per column inside a component.
    pub column_size: usize,
    /// Gap between example columns and between stacked examples.
    pub card_gap: f64,
    /// Padding around each component and gap between components in a row.
    pub component_padding: f64,
    /// Height of a component's heading block, including the gap below it.
    pub header_height: f64,
}

impl Default for GridMetrics {
    fn default() -> Self {
        Self {
            card_width: 700.0,
            column_size: 4,
            card_gap: 32.0,
            component_padding: 96.0,
            header_height: 120.0,
        }
    }
}

/// A card positioned on the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedCard {
    /// Which example this is.
    pub id: CardId,
    /// Canvas-space bounds.
    pub bounds: Rect,
}

/// Result of [`CardRegistry::layout`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CanvasLayout {
    /// Every card, in registry order.
    pub cards: Vec<PlacedCard>,
    /// Size of the whole canvas.
    pub size: Size,
}

/// Explicit list of the components shown on the Explore canvas.
///
/// The page receives a registry instead of reading global documentation
/// data, so tests can build a fixed fixture.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CardRegistry {
    components: Vec<ComponentEntry>,
}

impl CardRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a component, builder style.
    #[must_use]
    pub fn with_component(
        mut self,
        name: impl Into<String>,
        examples: impl IntoIterator<Item = ExampleCard>,
    ) -> Self {
        self.push(name, examples);
        self
    }

    /// Adds a component.
    pub fn push(
        &mut self,
        name: impl Into<String>,
        examples: impl IntoIterator<Item = ExampleCard>,
    ) {
        self.components.push(ComponentEntry {
            name: name.into(),
            examples: examples.into_iter().collect(),
        });
    }

    /// All components.
    #[must_use]
    pub fn components(&self) -> &[ComponentEntry] {
        &self.components
    }

    /// Looks up one example.
    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&ExampleCard> {
        self.components.get(id.component)?.examples.get(id.example)
    }

    /// Total number of example cards.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.components.iter().map(|c| c.examples.len()).sum()
    }

    /// Lays the components out on a canvas.
    ///
    /// Components are placed in rows of `floor(sqrt(n))`, left to right. Inside
    /// a component, examples are chunked into columns of
    /// [`GridMetrics::column_size`] and stacked top to bottom.
    #[must_use]
    pub fn layout(&self, metrics: &GridMetrics) -> CanvasLayout {
        let per_row = self.components.len().isqrt().max(1);
        let column_size = metrics.column_size.max(1);
        let pad = metrics.component_padding;
        let column_pitch = metrics.card_width + metrics.card_gap;

        let mut cards = Vec::with_capacity(self.card_count());
        let mut canvas = Size::ZERO;
        let mut row_top = 0.0;

        for (row_index, row) in self.components.chunks(per_row).enumerate() {
            let mut left = 0.0;
            let mut row_height: f64 = 0.0;
            for (offset, component) in row.iter().enumerate() {
                let component_index = row_index * per_row + offset;
                let content_top = row_top + pad + metrics.header_height;
                let mut content = Size::ZERO;

                for (column_index, column) in component.examples.chunks(column_size).enumerate() {
                    let x = left + pad + column_index as f64 * column_pitch;
                    let mut y = content_top;
                    for (row_in_column, example) in column.iter().enumerate() {
                        let height = example.height.max(0.0);
                        cards.push(PlacedCard {
                            id: CardId {
                                component: component_index,
                                example: column_index * column_size + row_in_column,
                            },
                            bounds: Rect::from_origin_size(
                                Point::new(x, y),
                                Size::new(metrics.card_width, height),
                            ),
                        });
                        y += height + metrics.card_gap;
                    }
                    content.width = x + metrics.card_width - (left + pad);
                    content.height = content.height.max(y - metrics.card_gap - content_top);
                }

                let width = content.width + 2.0 * pad;
                let height = metrics.header_height + content.height + 2.0 * pad;
                left += width + pad;
                row_height = row_height.max(height);
            }
            canvas.width = canvas.width.max(left - pad);
            row_top += row_height;
        }
        canvas.height = row_top;

        CanvasLayout {
            cards,
            size: canvas,
        }
    }
}
