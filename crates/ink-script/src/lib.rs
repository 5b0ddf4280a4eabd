//! Script capture surface.
//!
//! Scripts found in markup are handed off here and never executed. The hand
//! off is one-way: the parser does not wait for, or look at, any outcome.

/// Script payload extracted from a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptSource {
    pub origin: String,
    pub source: String,
}

impl ScriptSource {
    /// Inline `<script>` block number `index` (zero based, document order).
    pub fn inline(index: usize, source: impl Into<String>) -> Self {
        Self {
            origin: format!("inline:{index}"),
            source: source.into(),
        }
    }
}

/// Receiver for extracted scripts.
pub trait ScriptSink {
    fn accept(&mut self, script: ScriptSource);
}

impl<F> ScriptSink for F
where
    F: FnMut(ScriptSource),
{
    fn accept(&mut self, script: ScriptSource) {
        self(script);
    }
}

/// Sink that drops every script.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardScripts;

impl ScriptSink for DiscardScripts {
    fn accept(&mut self, script: ScriptSource) {
        log::trace!("discarding script {} ({} bytes)", script.origin, script.source.len());
    }
}

/// Capture limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptCaptureConfig {
    /// Scripts past this count are dropped.
    pub max_scripts: usize,
    /// Scripts larger than this many bytes are dropped.
    pub max_script_bytes: usize,
}

impl Default for ScriptCaptureConfig {
    fn default() -> Self {
        Self {
            max_scripts: 128,
            max_script_bytes: 2 * 1024 * 1024,
        }
    }
}

/// Sink that records scripts in arrival order, within configured limits.
#[derive(Debug, Clone, Default)]
pub struct CapturedScripts {
    config: ScriptCaptureConfig,
    scripts: Vec<ScriptSource>,
    dropped: usize,
}

impl CapturedScripts {
    pub fn new(config: ScriptCaptureConfig) -> Self {
        Self {
            config,
            scripts: Vec::new(),
            dropped: 0,
        }
    }

    pub fn scripts(&self) -> &[ScriptSource] {
        &self.scripts
    }

    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }

    pub fn clear(&mut self) {
        self.scripts.clear();
        self.dropped = 0;
    }
}

impl ScriptSink for CapturedScripts {
    fn accept(&mut self, script: ScriptSource) {
        if self.scripts.len() >= self.config.max_scripts {
            log::warn!(
                "dropping script {}: capture limit of {} scripts reached",
                script.origin,
                self.config.max_scripts
            );
            self.dropped = self.dropped.saturating_add(1);
            return;
        }

        if script.source.len() > self.config.max_script_bytes {
            log::warn!(
                "dropping script {}: {} bytes exceeds limit of {}",
                script.origin,
                script.source.len(),
                self.config.max_script_bytes
            );
            self.dropped = self.dropped.saturating_add(1);
            return;
        }

        self.scripts.push(script);
    }
}
