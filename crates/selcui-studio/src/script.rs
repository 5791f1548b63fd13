use std::thread::JoinHandle;
use std::time::Duration;

use anyhow::{Context, Result};
use selcui_engine::event::EventSender;

/// One line of a replay script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Send(String),
    Wait(Duration),
}

/// Wire messages replayed as if they came from the server.
///
/// Format: one message per line; `wait <ms>` pauses; `#` starts a comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    steps: Vec<Step>,
}

const DEMO: &str = "\
# primary cuboid, legacy keys
sel|cuboid
p0|-4|60|-4
wait 400
p1|4|66|3
wait 800
grid|2|cull
wait 1500
# multi slot cylinder next to it
+s|cylinder
+cyl|14|62|0|4.5|3.5
+mm|60|67
wait 1500
col|#ff3333cc|#ff999966|#33ff33cc|#3333ffcc
wait 1500
s|polyhedron
p|0|-4|60|-4
p|1|4|60|-4
p|2|0|60|4
p|3|0|68|0
poly|0|1|2
poly|0|1|3
poly|1|2|3
poly|2|0|3
wait 2000
s|ellipsoid
e|0|0|64|0
e|1|6.5|4.5|6.5
";

impl Script {
    pub fn demo() -> Self {
        // The built-in script is well-formed.
        Self::parse(DEMO).unwrap_or_default()
    }

    pub fn load(path: &str) -> Result<Self> {
        let text = std::fs::read_to_string(path).with_context(|| format!("failed to read script `{path}`"))?;
        Self::parse(&text).with_context(|| format!("invalid script `{path}`"))
    }

    pub fn parse(text: &str) -> Result<Self> {
        let mut steps = Vec::new();
        for (n, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match line.strip_prefix("wait ") {
                Some(ms) => {
                    let ms: u64 = ms.trim().parse().with_context(|| format!("line {}: bad wait", n + 1))?;
                    steps.push(Step::Wait(Duration::from_millis(ms)));
                }
                None => steps.push(Step::Send(line.to_owned())),
            }
        }
        Ok(Self { steps })
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }
}

/// Plays `script` on a background thread, standing in for the network.
pub fn spawn_replay(tx: EventSender, script: Script) -> Result<JoinHandle<()>> {
    std::thread::Builder::new()
        .name("selcui-replay".into())
        .spawn(move || {
            for step in script.steps {
                match step {
                    Step::Wait(d) => std::thread::sleep(d),
                    Step::Send(msg) => {
                        if !tx.send(msg) {
                            return;
                        }
                    }
                }
            }
            log::debug!("replay script finished");
        })
        .context("failed to spawn replay thread")
}
