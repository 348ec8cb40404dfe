//! Backend commands queued from UI to the backend worker.

pub enum BackendCommand {
    LoadCatalog,
    Signup { activity: String, email: String },
    Unregister { activity: String, email: String },
}
