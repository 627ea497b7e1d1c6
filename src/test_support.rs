//! Shared HTML samples and in-memory service fakes for unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use crate::adapters::{
    ClusterLauncher, ClusterRequest, CrawlStart, CrawlerStarter, FetchedPage, FunctionInvoker,
    ObjectStore, PageFetcher,
};
use crate::error::{PipelineError, Result};

pub const ELTIEMPO_SAMPLE: &str = r#"
<html>
    <head><title>El Tiempo</title></head>
    <body>
        <article>
            <a href="/politica/congreso/nueva-ley-aprobada">Nueva ley aprobada en el congreso</a>
        </article>
        <article>
            <a href="/deportes/futbol/colombia-gana-partido">Colombia gana importante partido</a>
        </article>
        <div class="noticia">
            <a href="/economia/inflacion/datos-economia">Nuevos datos sobre economía nacional</a>
        </div>
        <script type="application/ld+json">
        [
            {
                "@type": "NewsArticle",
                "headline": "Noticia desde JSON-LD",
                "mainEntityOfPage": {
                    "@id": "https://www.eltiempo.com/tecnologia/ciencia/descubrimiento-cientifico"
                }
            }
        ]
        </script>
    </body>
</html>
"#;

pub const PUBLIMETRO_SAMPLE: &str = r#"
<html>
    <head><title>Publimetro</title></head>
    <body>
        <article class="b-top-table-list-xl">
            <span class="c-overline">Deportes</span>
            <h2 class="c-heading">
                <a class="c-link" href="/deportes/futbol-local">Fútbol local en auge</a>
            </h2>
        </article>
        <div class="b-card-list">
            <article class="b-card-list__main-item">
                <span class="c-overline">Entretenimiento</span>
                <h3 class="c-heading">
                    <a class="c-link" href="/entretenimiento/musica">Nueva música colombiana</a>
                </h3>
            </article>
            <article class="b-card-list__secondary-item">
                <h3 class="c-heading">
                    <a class="c-link" href="/noticias/cultura">Eventos culturales</a>
                </h3>
            </article>
        </div>
        <article class="b-top-table-list-small">
            <h2 class="c-heading">
                <a class="c-link" href="/barranquilla/noticias-locales">Noticias de Barranquilla</a>
            </h2>
        </article>
    </body>
</html>
"#;

pub const EMPTY_SAMPLE: &str = r#"
<html>
    <head><title>Página vacía</title></head>
    <body>
        <div>Contenido sin noticias</div>
    </body>
</html>
"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub body: Vec<u8>,
    pub content_type: String,
}

/// Object store keyed by `(bucket, key)` that records every put.
#[derive(Default)]
pub struct MemoryStore {
    objects: Mutex<HashMap<(String, String), StoredObject>>,
    puts: Mutex<Vec<(String, String)>>,
    reject_puts_containing: Option<String>,
}

impl MemoryStore {
    pub fn with_object(bucket: &str, key: &str, body: &str) -> Self {
        let store = Self::default();
        store.objects.lock().expect("poisoned mutex").insert(
            (bucket.to_string(), key.to_string()),
            StoredObject {
                body: body.as_bytes().to_vec(),
                content_type: "text/html".to_string(),
            },
        );
        store
    }

    /// Fail every put whose key contains `fragment`.
    pub fn rejecting_puts(mut self, fragment: &str) -> Self {
        self.reject_puts_containing = Some(fragment.to_string());
        self
    }

    pub fn object(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        self.objects
            .lock()
            .expect("poisoned mutex")
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    pub fn puts(&self) -> Vec<(String, String)> {
        self.puts.lock().expect("poisoned mutex").clone()
    }
}

impl ObjectStore for MemoryStore {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        self.object(bucket, key)
            .map(|o| o.body)
            .ok_or_else(|| PipelineError::service("s3:GetObject", format!("NoSuchKey: {key}")))
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<()> {
        if self
            .reject_puts_containing
            .as_deref()
            .is_some_and(|fragment| key.contains(fragment))
        {
            return Err(PipelineError::service("s3:PutObject", format!("AccessDenied: {key}")));
        }
        self.objects.lock().expect("poisoned mutex").insert(
            (bucket.to_string(), key.to_string()),
            StoredObject {
                body,
                content_type: content_type.to_string(),
            },
        );
        self.puts
            .lock()
            .expect("poisoned mutex")
            .push((bucket.to_string(), key.to_string()));
        Ok(())
    }
}

/// Canned responses per URL; unknown URLs fail like a connection error.
#[derive(Default)]
pub struct FakeFetcher {
    pages: HashMap<String, FetchedPage>,
    requested: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub fn respond(mut self, url: &str, status: u16, body: &str) -> Self {
        self.pages.insert(
            url.to_string(),
            FetchedPage {
                status,
                body: body.as_bytes().to_vec(),
            },
        );
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().expect("poisoned mutex").clone()
    }
}

impl PageFetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        self.requested
            .lock()
            .expect("poisoned mutex")
            .push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| PipelineError::service("http", format!("connection refused: {url}")))
    }
}

#[derive(Default)]
pub struct CapturingInvoker {
    calls: Mutex<Vec<(String, Vec<u8>)>>,
}

impl CapturingInvoker {
    pub fn calls(&self) -> Vec<(String, Vec<u8>)> {
        self.calls.lock().expect("poisoned mutex").clone()
    }
}

impl FunctionInvoker for CapturingInvoker {
    async fn invoke_async(&self, function_name: &str, payload: &[u8]) -> Result<()> {
        self.calls
            .lock()
            .expect("poisoned mutex")
            .push((function_name.to_string(), payload.to_vec()));
        Ok(())
    }
}

/// Crawler that replays scripted outcomes, then reports `Started`.
#[derive(Default)]
pub struct ScriptedCrawler {
    outcomes: Mutex<VecDeque<Result<CrawlStart>>>,
    starts: Mutex<Vec<String>>,
}

impl ScriptedCrawler {
    pub fn with_outcomes(outcomes: Vec<Result<CrawlStart>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            starts: Mutex::default(),
        }
    }

    pub fn starts(&self) -> Vec<String> {
        self.starts.lock().expect("poisoned mutex").clone()
    }
}

impl CrawlerStarter for ScriptedCrawler {
    async fn start_crawler(&self, name: &str) -> Result<CrawlStart> {
        self.starts
            .lock()
            .expect("poisoned mutex")
            .push(name.to_string());
        self.outcomes
            .lock()
            .expect("poisoned mutex")
            .pop_front()
            .unwrap_or(Ok(CrawlStart::Started))
    }
}

pub struct FakeLauncher {
    outcome: std::result::Result<String, String>,
    requests: Mutex<Vec<ClusterRequest>>,
}

impl FakeLauncher {
    pub fn succeeding(job_flow_id: &str) -> Self {
        Self {
            outcome: Ok(job_flow_id.to_string()),
            requests: Mutex::default(),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            outcome: Err(message.to_string()),
            requests: Mutex::default(),
        }
    }

    pub fn requests(&self) -> Vec<ClusterRequest> {
        self.requests.lock().expect("poisoned mutex").clone()
    }
}

impl ClusterLauncher for FakeLauncher {
    async fn launch(&self, request: &ClusterRequest) -> Result<String> {
        self.requests
            .lock()
            .expect("poisoned mutex")
            .push(request.clone());
        self.outcome
            .clone()
            .map_err(|message| PipelineError::service("emr:RunJobFlow", message))
    }
}
