mod layout;
mod report;

use std::env;
use std::error::Error;

use layout::build_sample_bridge;
use log::info;
use report::render_summary;
use trussreact::{Editor, EditorConfig};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    // An optional JSON file overrides the default placement policy of two
    // supports locked to the ground level.
    let config = match env::args().nth(1) {
        Some(path) => {
            info!("loading configuration from {path}");
            EditorConfig::load(path)?
        }
        None => EditorConfig::default(),
    };

    let mut editor = Editor::new(config);
    let layout = build_sample_bridge(&mut editor)?;
    info!(
        "built sample bridge between supports {:?} and {:?} with apex {:?}",
        layout.left_support, layout.right_support, layout.apex
    );

    // Only a connected structure with two supports can be resolved; the
    // error explains which requirement failed.
    editor.resolve()?;

    println!("{}", render_summary(editor.structure()));

    Ok(())
}
