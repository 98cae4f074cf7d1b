use std::{collections::HashSet, path::Path, sync::Arc};

use models::{
    defaults, Category, ContentRecord, Document, KnowledgeItem, LandingPage, MailConfig,
    ServiceOffering, Workshop,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use tracing::{info, instrument, warn};

use crate::{
    errors::ServiceError,
    storage::{CollectionStore, JsonFileStore},
};

/// All persisted content categories behind one façade.
///
/// Payloads cross this boundary as `serde_json::Value`. They are decoded into
/// the typed record for the category and validated before anything is
/// written, but the stored document is the payload itself, so a read returns
/// exactly what was written.
pub struct ContentService {
    services: CollectionStore<Document<ServiceOffering>>,
    workshops: CollectionStore<Document<Workshop>>,
    best_practices: CollectionStore<Document<KnowledgeItem>>,
    resources: CollectionStore<Document<KnowledgeItem>>,
    mail: Arc<JsonFileStore<Option<Document<MailConfig>>>>,
    landing: Arc<JsonFileStore<Document<LandingPage>>>,
}

impl ContentService {
    /// Open (and seed where missing) every category file under `data_dir`.
    pub async fn open(data_dir: &Path) -> Result<Arc<Self>, ServiceError> {
        let svc = Self {
            services: CollectionStore::open(data_dir, Category::Services, documents(defaults::services())?).await?,
            workshops: CollectionStore::open(data_dir, Category::Workshops, documents(defaults::workshops())?).await?,
            best_practices: CollectionStore::open(data_dir, Category::BestPractices, documents(defaults::best_practices())?).await?,
            resources: CollectionStore::open(data_dir, Category::Resources, documents(defaults::resources())?).await?,
            mail: JsonFileStore::open(data_dir.join(Category::MailConfig.file_name()), None).await?,
            landing: JsonFileStore::open(
                data_dir.join(Category::LandingPage.file_name()),
                Document::from_value(defaults::landing_page()).map_err(ServiceError::storage)?,
            )
            .await?,
        };
        info!(data_dir = %data_dir.display(), "content stores opened");
        Ok(Arc::new(svc))
    }

    /// Whole category as JSON: an array for collections, a document (or
    /// `null` for an unset mail config) for singletons.
    pub async fn read(&self, category: Category) -> Result<Value, ServiceError> {
        let value = match category {
            Category::Services => to_json(&self.services.list().await),
            Category::Workshops => to_json(&self.workshops.list().await),
            Category::BestPractices => to_json(&self.best_practices.list().await),
            Category::Resources => to_json(&self.resources.list().await),
            Category::MailConfig => to_json(&self.mail.read().await),
            Category::LandingPage => to_json(&self.landing.read().await),
        };
        common::metrics::record_read(category.slug(), value.is_ok());
        value
    }

    /// Wholesale replace of a category. Returns what was stored.
    #[instrument(skip(self, payload))]
    pub async fn replace(&self, category: Category, payload: Value) -> Result<Value, ServiceError> {
        let res: Result<Value, ServiceError> = async {
            match category {
                Category::Services => {
                    let records: Vec<Document<ServiceOffering>> = decode(category, payload)?;
                    warn_dangling_dependencies(&records.iter().map(Document::get).collect::<Vec<_>>());
                    to_json(&self.services.replace_all(records).await?)
                }
                Category::Workshops => replace_collection(&self.workshops, payload).await,
                Category::BestPractices => replace_collection(&self.best_practices, payload).await,
                Category::Resources => replace_collection(&self.resources, payload).await,
                Category::MailConfig => {
                    let cfg: Option<Document<MailConfig>> = decode(category, payload)?;
                    if let Some(c) = &cfg {
                        c.get().validate()?;
                    }
                    self.mail.write(cfg.clone()).await?;
                    to_json(&cfg)
                }
                Category::LandingPage => {
                    let page: Document<LandingPage> = decode(category, payload)?;
                    page.get().validate()?;
                    self.landing.write(page.clone()).await?;
                    to_json(&page)
                }
            }
        }
        .await;
        common::metrics::record_write(category.slug(), "replace", res.is_ok());
        res
    }

    /// Insert or replace a single record of a collection category.
    #[instrument(skip(self, record))]
    pub async fn upsert(&self, category: Category, record: Value) -> Result<Value, ServiceError> {
        let res: Result<Value, ServiceError> = async {
            match category {
                Category::Services => {
                    let rec: Document<ServiceOffering> = decode(category, record)?;
                    let saved = self.services.upsert(rec).await?;
                    let all = self.services.list().await;
                    warn_dangling_dependencies(&all.iter().map(Document::get).collect::<Vec<_>>());
                    to_json(&saved)
                }
                Category::Workshops => upsert_record(&self.workshops, record).await,
                Category::BestPractices => upsert_record(&self.best_practices, record).await,
                Category::Resources => upsert_record(&self.resources, record).await,
                Category::MailConfig | Category::LandingPage => Err(ServiceError::Validation(format!(
                    "{category} is a single document; replace it wholesale"
                ))),
            }
        }
        .await;
        common::metrics::record_write(category.slug(), "upsert", res.is_ok());
        res
    }

    /// Delete one record by id. Idempotent: an absent id yields `Ok(false)`.
    #[instrument(skip(self))]
    pub async fn delete(&self, category: Category, id: &str) -> Result<bool, ServiceError> {
        let res = match category {
            Category::Services => self.services.delete(id).await,
            Category::Workshops => self.workshops.delete(id).await,
            Category::BestPractices => self.best_practices.delete(id).await,
            Category::Resources => self.resources.delete(id).await,
            Category::MailConfig | Category::LandingPage => Err(ServiceError::Validation(format!(
                "{category} has no records to delete"
            ))),
        };
        common::metrics::record_write(category.slug(), "delete", res.is_ok());
        res
    }

    /// Single record of a collection category.
    pub async fn get_record(&self, category: Category, id: &str) -> Result<Value, ServiceError> {
        let found = match category {
            Category::Services => self.services.get(id).await.map(|r| to_json(&r)),
            Category::Workshops => self.workshops.get(id).await.map(|r| to_json(&r)),
            Category::BestPractices => self.best_practices.get(id).await.map(|r| to_json(&r)),
            Category::Resources => self.resources.get(id).await.map(|r| to_json(&r)),
            Category::MailConfig | Category::LandingPage => None,
        };
        found.unwrap_or_else(|| Err(ServiceError::not_found(&format!("{category}/{id}"))))
    }

    /// Every public category keyed by slug, for one-shot page loads.
    pub async fn snapshot_public(&self) -> Result<Map<String, Value>, ServiceError> {
        let mut out = Map::new();
        for category in Category::ALL.into_iter().filter(|c| c.is_public()) {
            out.insert(category.slug().to_string(), self.read(category).await?);
        }
        Ok(out)
    }

    pub async fn mail_config(&self) -> Option<MailConfig> {
        self.mail.read().await.map(Document::into_inner)
    }

    pub async fn set_mail_config(&self, cfg: MailConfig) -> Result<(), ServiceError> {
        cfg.validate()?;
        let doc = Document::from_value(cfg).map_err(ServiceError::storage)?;
        self.mail.write(Some(doc)).await
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<Value, ServiceError> {
    serde_json::to_value(value).map_err(ServiceError::storage)
}

fn decode<T: DeserializeOwned>(category: Category, payload: Value) -> Result<T, ServiceError> {
    serde_json::from_value(payload)
        .map_err(|e| ServiceError::Validation(format!("invalid {category} payload: {e}")))
}

fn documents<T: Serialize + DeserializeOwned>(values: Vec<T>) -> Result<Vec<Document<T>>, ServiceError> {
    values
        .into_iter()
        .map(|v| Document::from_value(v).map_err(ServiceError::storage))
        .collect()
}

async fn replace_collection<T: ContentRecord>(
    store: &CollectionStore<Document<T>>,
    payload: Value,
) -> Result<Value, ServiceError> {
    let records: Vec<Document<T>> = decode(store.category(), payload)?;
    to_json(&store.replace_all(records).await?)
}

async fn upsert_record<T: ContentRecord>(
    store: &CollectionStore<Document<T>>,
    record: Value,
) -> Result<Value, ServiceError> {
    let rec: Document<T> = decode(store.category(), record)?;
    to_json(&store.upsert(rec).await?)
}

/// Dependencies are never enforced; unknown ids are only logged.
fn warn_dangling_dependencies(services: &[&ServiceOffering]) -> usize {
    let known: HashSet<&str> = services.iter().map(|s| s.id.as_str()).collect();
    let mut dangling = 0;
    for s in services {
        for dep in s.dependencies.iter().filter(|d| !known.contains(d.as_str())) {
            warn!(service = %s.id, dependency = %dep, "service depends on unknown service id");
            dangling += 1;
        }
    }
    dangling
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{cleanup, temp_data_dir};
    use serde_json::json;

    #[tokio::test]
    async fn every_category_round_trips_wholesale() -> anyhow::Result<()> {
        let dir = temp_data_dir("content_rt");
        let svc = ContentService::open(&dir).await?;

        let payloads = [
            (Category::Services, json!([{"id": "s1", "title": "S", "price": "1 €", "technologies": ["CAP"], "processSteps": [{"title": "Kickoff", "icon": "rocket"}], "dependencies": ["ghost"], "badge": "new"}])),
            (Category::Workshops, json!([{"id": "w1", "title": "W", "duration": "1 Tag", "maxParticipants": 10}, {"id": "w2", "title": "W2", "maxParticipants": null}])),
            (Category::BestPractices, json!([{"id": "b1", "title": "B", "downloadUrl": "/x.pdf"}])),
            (Category::Resources, json!([{"id": "r1", "title": "R", "externalUrl": "https://sap.com"}])),
            (Category::MailConfig, json!({"host": "smtp.example.com", "port": 465, "secure": true, "auth": {"user": "u", "pass": "p", "type": "login"}, "from": "a@b.c", "to": null})),
            (Category::LandingPage, json!({"hero": {"title": "T", "image": "/img/hero.png"}, "sections": [{"id": "s", "title": "S", "variant": "dark", "items": ["a", {"label": "x"}]}], "footer": {"note": "x"}})),
        ];

        for (category, payload) in payloads.iter() {
            let stored = svc.replace(*category, payload.clone()).await?;
            assert_eq!(&stored, payload, "{category}");
            assert_eq!(&svc.read(*category).await?, payload, "{category}");
        }

        // reopen from disk
        let reopened = ContentService::open(&dir).await?;
        for (category, payload) in payloads.iter() {
            assert_eq!(&reopened.read(*category).await?, payload, "{category}");
        }
        assert_eq!(reopened.mail_config().await.map(|c| c.port), Some(465));
        cleanup(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn fresh_store_serves_defaults() -> anyhow::Result<()> {
        let dir = temp_data_dir("content_defaults");
        let svc = ContentService::open(&dir).await?;
        assert_eq!(svc.read(Category::Services).await?, defaults::for_category(Category::Services));
        assert!(svc.read(Category::MailConfig).await?.is_null());
        let snap = svc.snapshot_public().await?;
        assert!(snap.contains_key("landing-page"));
        assert!(!snap.contains_key("mail-config"));
        cleanup(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn invalid_payloads_are_validation_errors() -> anyhow::Result<()> {
        let dir = temp_data_dir("content_invalid");
        let svc = ContentService::open(&dir).await?;
        let err = svc.replace(Category::Workshops, json!({"not": "an array"})).await.unwrap_err();
        assert!(err.is_client_error());
        let err = svc.replace(Category::MailConfig, json!({"host": "h", "port": 25, "from": "nobody"})).await.unwrap_err();
        assert!(err.is_client_error());
        let err = svc.upsert(Category::LandingPage, json!({})).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        cleanup(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn upsert_get_and_delete_by_id() -> anyhow::Result<()> {
        let dir = temp_data_dir("content_records");
        let svc = ContentService::open(&dir).await?;
        let saved = svc.upsert(Category::Resources, json!({"id": "", "title": "New"})).await?;
        let id = saved["id"].as_str().unwrap().to_string();
        assert_eq!(svc.get_record(Category::Resources, &id).await?["title"], "New");

        assert!(svc.delete(Category::Resources, &id).await?);
        assert!(!svc.delete(Category::Resources, &id).await?);
        assert!(matches!(svc.get_record(Category::Resources, &id).await, Err(ServiceError::NotFound(_))));
        cleanup(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn upsert_keeps_the_payload_and_fills_only_the_id() -> anyhow::Result<()> {
        let dir = temp_data_dir("content_upsert_raw");
        let svc = ContentService::open(&dir).await?;
        let saved = svc
            .upsert(Category::Workshops, json!({"id": "", "title": "W", "maxParticipants": null, "room": {"floor": 2}}))
            .await?;
        let id = saved["id"].as_str().unwrap().to_string();
        assert_eq!(
            svc.get_record(Category::Workshops, &id).await?,
            json!({"id": id, "title": "W", "maxParticipants": null, "room": {"floor": 2}})
        );
        cleanup(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn reserved_id_is_rejected() -> anyhow::Result<()> {
        let dir = temp_data_dir("content_reserved_id");
        let svc = ContentService::open(&dir).await?;
        let err = svc.upsert(Category::Resources, json!({"id": "records", "title": "R"})).await.unwrap_err();
        assert!(err.is_client_error());
        let err = svc.replace(Category::Resources, json!([{"id": "records", "title": "R"}])).await.unwrap_err();
        assert!(err.is_client_error());
        cleanup(&dir).await;
        Ok(())
    }

    #[test]
    fn dangling_dependencies_are_counted() {
        let services: Vec<ServiceOffering> = serde_json::from_value(json!([
            {"id": "a", "title": "A", "dependencies": ["b", "zzz"]},
            {"id": "b", "title": "B"}
        ]))
        .unwrap();
        assert_eq!(warn_dangling_dependencies(&services.iter().collect::<Vec<_>>()), 1);
    }
}
