//! Built-in datasets. They seed empty data files on first start and are the
//! last tier of the client fallback chain.

use serde_json::{Map, Value};

use crate::{
    catalog::{ProcessStep, ServiceOffering, Workshop},
    category::Category,
    knowledge::KnowledgeItem,
    landing::{Hero, LandingPage, LandingSection},
};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn step(title: &str, description: &str) -> ProcessStep {
    ProcessStep { title: title.into(), description: description.into(), extra: Map::new() }
}

pub fn services() -> Vec<ServiceOffering> {
    vec![
        ServiceOffering {
            id: "btp-readiness-check".into(),
            title: "BTP Readiness Check".into(),
            description: "Assess the existing SAP landscape and identify quick wins on SAP BTP.".into(),
            price: "ab 4.900 €".into(),
            category: "strategy".into(),
            technologies: strings(&["SAP BTP", "SAP Signavio"]),
            process_steps: vec![
                step("Kickoff", "Goals, scope and stakeholders"),
                step("Analysis", "Landscape and process review"),
                step("Roadmap", "Prioritised recommendations"),
            ],
            dependencies: Vec::new(),
            extra: Map::new(),
        },
        ServiceOffering {
            id: "integration-suite-setup".into(),
            title: "Integration Suite Setup".into(),
            description: "Provision SAP Integration Suite and deliver the first productive interfaces.".into(),
            price: "ab 9.500 €".into(),
            category: "integration".into(),
            technologies: strings(&["SAP Integration Suite", "SAP Cloud Connector"]),
            process_steps: vec![
                step("Provisioning", "Subaccount, entitlements and connectivity"),
                step("Build", "First iFlows and monitoring"),
                step("Handover", "Documentation and enablement"),
            ],
            dependencies: strings(&["btp-readiness-check"]),
            extra: Map::new(),
        },
        ServiceOffering {
            id: "cap-extension".into(),
            title: "Side-by-Side Extension".into(),
            description: "Build a CAP application that extends S/4HANA without touching the core.".into(),
            price: "auf Anfrage".into(),
            category: "development".into(),
            technologies: strings(&["SAP CAP", "SAP HANA Cloud", "SAP Build Work Zone"]),
            process_steps: vec![
                step("Design", "Domain model and UX"),
                step("Develop", "Iterative delivery in sprints"),
                step("Go-live", "Transport and hypercare"),
            ],
            dependencies: strings(&["btp-readiness-check"]),
            extra: Map::new(),
        },
    ]
}

pub fn workshops() -> Vec<Workshop> {
    vec![
        Workshop {
            id: "btp-discovery-workshop".into(),
            title: "BTP Discovery Workshop".into(),
            description: "One day to align on goals, use cases and the next steps on SAP BTP.".into(),
            duration: "1 Tag".into(),
            price: "1.900 €".into(),
            max_participants: Some(12),
            extra: Map::new(),
        },
        Workshop {
            id: "clean-core-workshop".into(),
            title: "Clean Core Workshop".into(),
            description: "Classify custom code and plan its move to extensions.".into(),
            duration: "2 Tage".into(),
            price: "3.400 €".into(),
            max_participants: Some(8),
            extra: Map::new(),
        },
    ]
}

fn knowledge(id: &str, title: &str, description: &str, category: &str, download: Option<&str>, external: Option<&str>) -> KnowledgeItem {
    KnowledgeItem {
        id: id.into(),
        title: title.into(),
        description: description.into(),
        category: category.into(),
        download_url: download.map(str::to_string),
        external_url: external.map(str::to_string),
        extra: Map::new(),
    }
}

pub fn best_practices() -> Vec<KnowledgeItem> {
    vec![
        knowledge(
            "account-model",
            "Designing the BTP account model",
            "Separate subaccounts per stage and keep entitlements explicit.",
            "architecture",
            Some("/downloads/account-model.pdf"),
            None,
        ),
        knowledge(
            "clean-core",
            "Keeping the core clean",
            "Prefer released APIs and side-by-side extensions over modifications.",
            "development",
            None,
            Some("https://www.sap.com/products/technology-platform.html"),
        ),
    ]
}

pub fn resources() -> Vec<KnowledgeItem> {
    vec![
        knowledge(
            "btp-checklist",
            "BTP onboarding checklist",
            "Everything to prepare before the first subaccount goes live.",
            "checklist",
            Some("/downloads/btp-checklist.pdf"),
            None,
        ),
        knowledge(
            "discovery-center",
            "SAP Discovery Center",
            "Official service catalogue and mission library.",
            "link",
            None,
            Some("https://discovery-center.cloud.sap"),
        ),
    ]
}

pub fn landing_page() -> LandingPage {
    LandingPage {
        hero: Hero {
            title: "Your path to SAP BTP".into(),
            subtitle: "Pathfinder units take you from first idea to productive platform.".into(),
            cta_label: "Start the assessment".into(),
            cta_href: "/assessment".into(),
            extra: Map::new(),
        },
        sections: vec![
            LandingSection {
                id: "pathfinder".into(),
                title: "Pathfinder".into(),
                body: "Fixed-scope units you can combine as needed.".into(),
                items: ["Discover", "Architect", "Integrate", "Extend", "Analyze", "Operate"]
                    .into_iter()
                    .map(Value::from)
                    .collect(),
                extra: Map::new(),
            },
            LandingSection {
                id: "services".into(),
                title: "Services".into(),
                body: "From readiness check to productive extensions.".into(),
                items: Vec::new(),
                extra: Map::new(),
            },
        ],
        extra: Map::new(),
    }
}

/// Default payload for a category as JSON. Mail config has no default.
pub fn for_category(category: Category) -> Value {
    let value = match category {
        Category::Services => serde_json::to_value(services()),
        Category::Workshops => serde_json::to_value(workshops()),
        Category::BestPractices => serde_json::to_value(best_practices()),
        Category::Resources => serde_json::to_value(resources()),
        Category::LandingPage => serde_json::to_value(landing_page()),
        Category::MailConfig => Ok(Value::Null),
    };
    value.unwrap_or(Value::Null)
}
