mod slash_path_ext;

pub use slash_path_ext::SlashPathExt;
