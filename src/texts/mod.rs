use include_dir::{include_dir, Dir};
use rand::seq::SliceRandom;
use serde::Deserialize;
use serde_json::from_str;
use std::error::Error;

static TEXT_DIR: Dir = include_dir!("src/texts");

/// A named set of sample texts to type, embedded in the binary.
#[derive(Deserialize, Clone, Debug)]
pub struct TextSet {
    pub name: String,
    pub texts: Vec<String>,
}

impl TextSet {
    pub fn new(file_name: &str) -> Self {
        read_text_set(&format!("{file_name}.json")).unwrap()
    }

    /// Pick one sample text at random.
    pub fn pick(&self) -> String {
        let mut rng = rand::thread_rng();
        self.texts.choose(&mut rng).cloned().unwrap_or_default()
    }
}

fn read_text_set(file_name: &str) -> Result<TextSet, Box<dyn Error>> {
    let file = TEXT_DIR.get_file(file_name).expect("text set not found");

    let raw = file
        .contents_utf8()
        .expect("unable to interpret text set as a string");

    let set = from_str(raw).expect("unable to deserialize text set json");

    Ok(set)
}
