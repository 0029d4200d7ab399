use std::{
    collections::HashMap,
    sync::Mutex,
};

use sea_orm::{DatabaseConnection, DbErr, EntityTrait};

use crate::server::{
    error::image::ImageStoreError,
    model::analysis::AnalysisJob,
    service::{image::ImageStore, notifier::AnalysisDispatcher},
};

mod channel;

/// Dispatcher that keeps every job for later inspection.
#[derive(Default)]
struct RecordingDispatcher {
    jobs: Mutex<Vec<AnalysisJob>>,
}

impl RecordingDispatcher {
    fn jobs(&self) -> Vec<AnalysisJob> {
        self.jobs.lock().unwrap().clone()
    }
}

impl AnalysisDispatcher for RecordingDispatcher {
    fn dispatch(&self, job: AnalysisJob) {
        self.jobs.lock().unwrap().push(job);
    }
}

/// Image store keeping objects in memory, optionally failing every call.
#[derive(Default)]
struct MemoryImageStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
    deleted: Mutex<Vec<String>>,
    fail_uploads: bool,
    fail_deletes: bool,
}

impl MemoryImageStore {
    fn failing_uploads() -> Self {
        Self {
            fail_uploads: true,
            ..Default::default()
        }
    }

    fn failing_deletes() -> Self {
        Self {
            fail_deletes: true,
            ..Default::default()
        }
    }

    fn contains(&self, reference: &str) -> bool {
        self.objects.lock().unwrap().contains_key(reference)
    }

    fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

impl ImageStore for MemoryImageStore {
    async fn upload(
        &self,
        object_name: &str,
        bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<String, ImageStoreError> {
        if self.fail_uploads {
            return Err(ImageStoreError::UnexpectedStatus {
                status: 503,
                object: object_name.to_string(),
            });
        }

        let reference = format!("memory://images/{}", object_name);
        self.objects
            .lock()
            .unwrap()
            .insert(reference.clone(), bytes);

        Ok(reference)
    }

    async fn delete(&self, reference: &str) -> Result<(), ImageStoreError> {
        if self.fail_deletes {
            return Err(ImageStoreError::UnexpectedStatus {
                status: 503,
                object: reference.to_string(),
            });
        }

        self.objects.lock().unwrap().remove(reference);
        self.deleted.lock().unwrap().push(reference.to_string());

        Ok(())
    }
}

/// Reads a channel's activation flag straight from storage.
async fn channel_status(db: &DatabaseConnection, id: i32) -> Result<bool, DbErr> {
    Ok(entity::prelude::Channel::find_by_id(id)
        .one(db)
        .await?
        .map(|c| c.status)
        .unwrap_or(false))
}
