//! The line-oriented description format (`Setting.txt`).
//!
//! ```text
//! name:Demo
//! width:360
//! height:960
//! back.png:x@0,y@0,z@-100
//! Text:x@20,y@50,z@1,FontSize@32,FontFamily@#Impact,Foreground@#00FFFF,data@CPUTemp,unit@°C
//! BorderLine:x@20,y@100,z@2,maxwidth@320,maxheight@15,Fill@#00FFFF,data@CpuUsage,MaxNum@100
//! ```

mod color;
mod generator;
mod params;
mod parser;

pub use color::{is_valid_hex_color, normalize_color, normalize_or_default, DEFAULT_COLOR};
pub use generator::{
    generate, generate_with, widget_line, write_description, GenerateOptions, LineEnding,
    BACKGROUND_Z_SENTINEL,
};
pub use params::Params;
pub use parser::{parse_file, parse_str, parse_str_with_hook, read_description};

/// Conventional file name of a description file inside a theme folder.
pub const DESCRIPTION_FILE_NAME: &str = "Setting.txt";
