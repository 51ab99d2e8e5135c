pub mod widget;

pub use widget::{ load_examples, ConfigError, RenderMode, WidgetConfig };
