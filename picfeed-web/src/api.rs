use std::rc::Rc;

use picfeed_client::{Backend, Diagnostics, HttpBackend, TracingDiagnostics};

/// Backend and diagnostic channel every network-calling view is handed
#[derive(Clone)]
pub struct Services {
    pub backend: Rc<dyn Backend>,
    pub diagnostics: Rc<dyn Diagnostics>,
}

impl PartialEq for Services {
    fn eq(&self, other: &Services) -> bool {
        Rc::ptr_eq(&self.backend, &other.backend)
            && Rc::ptr_eq(&self.diagnostics, &other.diagnostics)
    }
}

impl Services {
    /// Talk to the backend serving this page, log failures to the console
    pub fn for_page_origin() -> Services {
        let origin = web_sys::window()
            .expect("running outside of a browser window")
            .location()
            .origin()
            .expect("failed reading page origin");
        tracing::debug!(%origin, "resolving api requests against page origin");
        Services {
            backend: Rc::new(HttpBackend::new(crate::CLIENT.clone(), origin)),
            diagnostics: Rc::new(TracingDiagnostics),
        }
    }
}
