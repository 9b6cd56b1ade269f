use crate::ffmpeg::MediaInfo;
use crate::prelude::*;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug)]
pub(crate) struct SharedMockFfmpeg(Mutex<MockFfmpeg>);

#[derive(Debug, Default)]
pub(crate) struct MockFfmpeg {
    /// Media info returned by `probe` for the files with the given names
    pub(crate) media: HashMap<String, MediaInfo>,
    pub(crate) fail_export: bool,

    pub(crate) args_log: Vec<Vec<String>>,
    pub(crate) filter_graphs: Vec<String>,
    pub(crate) probe_log: Vec<String>,
}

impl SharedMockFfmpeg {
    pub(crate) fn new(media: impl IntoIterator<Item = (&'static str, MediaInfo)>) -> Arc<Self> {
        Arc::new(Self(Mutex::new(MockFfmpeg {
            media: media
                .into_iter()
                .map(|(name, info)| (name.to_owned(), info))
                .collect(),
            ..Default::default()
        })))
    }

    pub(crate) fn failing_export(self: Arc<Self>) -> Arc<Self> {
        self.0.lock().unwrap().fail_export = true;
        self
    }

    pub(crate) fn unwrap(self: Arc<Self>) -> MockFfmpeg {
        Arc::try_unwrap(self).unwrap().0.into_inner().unwrap()
    }
}

pub(crate) fn media(secs: u64, video: (u32, u32), has_audio: bool) -> MediaInfo {
    MediaInfo {
        duration: Duration::from_secs(secs),
        video: Some(video),
        has_audio,
    }
}

#[async_trait]
impl crate::ffmpeg::Ffmpeg for SharedMockFfmpeg {
    async fn run(&self, args: Vec<String>) -> Result<Vec<u8>> {
        let script_pos = args
            .iter()
            .position(|arg| arg == "-filter_complex_script")
            .unwrap();

        let filter_graph = fs::read_to_string(&args[script_pos + 1]).await?;

        let output = Utf8PathBuf::from(args.last().unwrap());

        let fail_export = {
            let mut me = self.0.lock().unwrap();
            me.args_log.push(args);
            me.filter_graphs.push(filter_graph);
            me.fail_export
        };

        if fail_export {
            fs::write(&output, "partially written video").await?;
            bail!("Process `ffmpeg` failed with exit status: 1");
        }

        fs::write(&output, "video").await?;

        Ok(vec![])
    }

    async fn probe(&self, path: &Utf8Path) -> Result<MediaInfo> {
        let mut me = self.0.lock().unwrap();

        let name = path.file_name().unwrap().to_owned();

        me.probe_log.push(name.clone());

        me.media
            .get(&name)
            .copied()
            .with_context(|| format!("Invalid data found when processing input `{path}`"))
    }
}
