use std::sync::Mutex;

use opentranscribe_core::{ModelManager, Settings, WhisperLoader};

/// What the app is currently doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    Idle,
    /// Ensuring the requested model variant is loaded
    Loading,
    Transcribing,
}

pub struct AppState {
    pub job: Mutex<JobState>,
    pub manager: Mutex<ModelManager<WhisperLoader>>,
    pub transcript: Mutex<String>,
    pub settings: Mutex<Settings>,
}

impl AppState {
    pub fn new(manager: ModelManager<WhisperLoader>, settings: Settings) -> Self {
        Self {
            job: Mutex::new(JobState::Idle),
            manager: Mutex::new(manager),
            transcript: Mutex::new(String::new()),
            settings: Mutex::new(settings),
        }
    }

    // ─── Helper methods to reduce .lock().unwrap() boilerplate ───

    /// Get the current job state
    pub fn job_state(&self) -> JobState {
        *self.job.lock().unwrap()
    }

    /// Set the job state
    pub fn set_job_state(&self, new_state: JobState) {
        *self.job.lock().unwrap() = new_state;
    }

    /// Claim the single job slot.
    ///
    /// Returns false when a job is already running; the resident model is
    /// only ever swapped while this slot is held, so an in-flight worker
    /// never observes a swap.
    pub fn try_begin_job(&self) -> bool {
        let mut job = self.job.lock().unwrap();
        if *job == JobState::Idle {
            *job = JobState::Loading;
            true
        } else {
            false
        }
    }

    /// Release the job slot
    pub fn finish_job(&self) {
        *self.job.lock().unwrap() = JobState::Idle;
    }

    /// Resident model as `(variant, device)` labels, without blocking.
    ///
    /// The manager lock is held for the whole of a model load, so a status
    /// query must not wait on it; while a load is underway this answers
    /// `None`, same as before the first load.
    pub fn resident_snapshot(&self) -> Option<(String, String)> {
        let manager = self.manager.try_lock().ok()?;
        let handle = manager.resident()?;
        Some((
            handle.variant().to_string(),
            handle.device().label().to_string(),
        ))
    }

    /// Current transcript buffer contents
    pub fn transcript(&self) -> String {
        self.transcript.lock().unwrap().clone()
    }

    /// Overwrite the transcript buffer wholesale
    pub fn set_transcript(&self, text: String) {
        *self.transcript.lock().unwrap() = text;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ModelManager::new(WhisperLoader), Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_slot_rejects_overlap() {
        let state = AppState::default();

        assert!(state.try_begin_job());
        assert_eq!(state.job_state(), JobState::Loading);

        // Second submission while a job is outstanding must be rejected
        assert!(!state.try_begin_job());

        state.set_job_state(JobState::Transcribing);
        assert!(!state.try_begin_job());

        state.finish_job();
        assert!(state.try_begin_job());
    }

    #[test]
    fn test_rejected_job_does_not_touch_transcript() {
        let state = AppState::default();
        state.set_transcript("existing transcript".to_string());

        assert!(state.try_begin_job());
        assert!(!state.try_begin_job());
        assert_eq!(state.transcript(), "existing transcript");
    }

    #[test]
    fn test_status_snapshot_does_not_wait_on_busy_manager() {
        let state = AppState::default();

        // Nothing resident yet
        assert_eq!(state.resident_snapshot(), None);

        // While a load holds the manager lock, the snapshot must answer
        // immediately instead of stalling behind it
        let _busy = state.manager.lock().unwrap();
        assert_eq!(state.resident_snapshot(), None);
    }

    #[test]
    fn test_transcript_overwritten_wholesale() {
        let state = AppState::default();
        state.set_transcript("first".to_string());
        state.set_transcript("second".to_string());
        assert_eq!(state.transcript(), "second");
    }
}
