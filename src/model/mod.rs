//! Theme data: the parsed snapshot and the editable project.

mod project;
mod theme;

pub use project::{
    load_project, save_project, BackgroundRef, BarBody, BorderLineBody, GridLineBody,
    ProjectWidget, TextBody, WidgetBody, WidgetKind, WidgetLayoutProject, DEFAULT_BACK_COLOR,
    PROJECT_EXTENSION,
};
pub use theme::{
    AnimatedImagePlacement, BarKind, BarWidget, BorderLineStyle, GridLineStyle, ImagePlacement,
    Orientation, TextWidget, Theme, ThemeType, DEFAULT_HEIGHT, DEFAULT_WIDTH,
};
