// HTML output for the views. Every dynamic string goes through `html::escape` or `html::attr`
// except the full description, which is governed by `MarkupPolicy`.

pub mod catalog;
pub mod detail;
pub mod html;
