use crate::prelude::*;
use crate::util::input::Terminal;
use async_trait::async_trait;
use expect_test::{expect_file, ExpectFile};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Version of [`expect_test::expect_file!`] macro that organizes the snapshots under
/// `tests/snapshots` folder. It automatically creates the folder if it doesn't exist.
pub(crate) async fn expect_file(file_path: &str) -> ExpectFile {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap();
    let mut path = Utf8PathBuf::from_iter([manifest_dir.as_str(), "tests", "snapshots"]);

    path.push(file_path);

    let parent = path.parent().unwrap();

    fs::create_dir_all(parent)
        .await
        .expect("Failed to create a directory for test snapshots");

    expect_file![path]
}

/// Creates a temp directory with the given files. Parent directories of
/// the files are created as well.
pub(crate) async fn temp_dir_with_files(files: &[&str]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();

    for file in files {
        let path = dir.path().unwrap_utf8().join(file);
        fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        fs::write(&path, file.as_bytes()).await.unwrap();
    }

    dir
}

/// Terminal that answers the prompts with the predefined lines and records
/// everything that was shown to the user.
#[derive(Debug)]
pub(crate) struct ScriptedTerminal(Mutex<ScriptedTerminalState>);

#[derive(Debug, Default)]
struct ScriptedTerminalState {
    answers: VecDeque<String>,
    transcript: Vec<String>,
}

impl ScriptedTerminal {
    pub(crate) fn new(answers: impl IntoIterator<Item = &'static str>) -> Self {
        Self(Mutex::new(ScriptedTerminalState {
            answers: answers.into_iter().map(ToOwned::to_owned).collect(),
            transcript: vec![],
        }))
    }

    /// Everything shown to the user. Prompts are followed by the scripted
    /// answers the same way they would look in a real terminal.
    pub(crate) fn transcript(&self) -> String {
        self.0.lock().unwrap().transcript.join("\n")
    }

    pub(crate) fn remaining_answers(&self) -> usize {
        self.0.lock().unwrap().answers.len()
    }
}

#[async_trait]
impl Terminal for ScriptedTerminal {
    fn print(&self, line: &str) {
        self.0.lock().unwrap().transcript.push(line.to_owned());
    }

    async fn read_line(&self, prompt: &str) -> Result<String> {
        let mut me = self.0.lock().unwrap();

        let answer = me
            .answers
            .pop_front()
            .with_context(|| format!("No scripted answer left for the prompt `{prompt}`"))?;

        me.transcript.push(format!("{prompt}{answer}"));

        Ok(answer)
    }
}
