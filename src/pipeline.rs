//! The run itself: fetch, extract, clean up, publish, in that order, with
//! an early stop at each guard.

use std::path::Path;

use tracing::{error, info};

use crate::extract;
use crate::fetch;
use crate::publish::{self, keys, ObjectStore};
use crate::settings::Settings;

/// Shared staging directory for the downloaded spreadsheet. Not namespaced
/// per invocation: correctness under concurrent runs is a non-goal of this
/// job, which is triggered at most once at a time.
pub const STAGING_DIR: &str = "/tmp";

/// The source site has served misconfigured certificate chains; the download
/// deliberately trusts any server identity.
const VERIFY_CERTIFICATES: bool = false;

/// Execute one batch run. Every failure mode is recovered and logged by the
/// stage that hit it; this function only decides how far the run gets.
pub async fn run<S: ObjectStore>(settings: &Settings, staging_dir: &Path, store: &S) {
    let Some(staged) =
        fetch::download_file(&settings.file_url, staging_dir, VERIFY_CERTIFICATES).await
    else {
        return;
    };

    let records = extract::extract_sheet(staged.path(), &settings.xls_sheet_name);
    let key = keys::object_key(staged.path(), &settings.xls_sheet_name);

    // The staged file is consumed either way; delete it before deciding
    // whether there is anything to publish.
    drop(staged);

    if records.is_empty() {
        error!("no data found to upload to S3");
        return;
    }

    if publish::publish_records(store, &key, &records).await {
        info!("{key} file uploaded successfully to S3");
    }
}
