use serde::Serialize;

/// A Pathfinder unit: a fixed-scope engagement module. Compiled in, read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathfinderUnit {
    pub id: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
    pub duration: &'static str,
    pub outcomes: &'static [&'static str],
    pub technologies: &'static [&'static str],
}

pub static PATHFINDER_UNITS: &[PathfinderUnit] = &[
    PathfinderUnit {
        id: "discover",
        title: "Discover",
        summary: "Map the current landscape and the business goals behind a move to SAP BTP.",
        duration: "2 weeks",
        outcomes: &["Landscape inventory", "Prioritised use-case backlog", "Stakeholder map"],
        technologies: &["SAP BTP Cockpit", "SAP Signavio"],
    },
    PathfinderUnit {
        id: "architect",
        title: "Architect",
        summary: "Design the target architecture: accounts, subaccounts, connectivity and security.",
        duration: "3 weeks",
        outcomes: &["Target architecture", "Account model", "Security concept"],
        technologies: &["SAP BTP", "SAP Cloud Connector", "SAP Cloud Identity Services"],
    },
    PathfinderUnit {
        id: "integrate",
        title: "Integrate",
        summary: "Connect SAP and non-SAP systems with managed integration flows and APIs.",
        duration: "4 weeks",
        outcomes: &["Integration blueprint", "First productive iFlows", "API catalogue"],
        technologies: &["SAP Integration Suite", "SAP API Management", "SAP Event Mesh"],
    },
    PathfinderUnit {
        id: "extend",
        title: "Extend",
        summary: "Build side-by-side extensions that keep the digital core clean.",
        duration: "4 weeks",
        outcomes: &["Extension pattern catalogue", "CAP reference application", "CI/CD pipeline"],
        technologies: &["SAP Cloud Application Programming Model", "SAP Build", "SAP HANA Cloud"],
    },
    PathfinderUnit {
        id: "analyze",
        title: "Analyze",
        summary: "Turn operational data into planning and analytics with a governed data layer.",
        duration: "3 weeks",
        outcomes: &["Data product map", "Analytics prototype"],
        technologies: &["SAP Datasphere", "SAP Analytics Cloud"],
    },
    PathfinderUnit {
        id: "operate",
        title: "Operate",
        summary: "Run the platform: monitoring, cost control and a support model.",
        duration: "2 weeks",
        outcomes: &["Operations handbook", "Cost dashboard", "Alerting setup"],
        technologies: &["SAP Cloud ALM", "SAP BTP Alert Notification"],
    },
];

pub fn all() -> &'static [PathfinderUnit] {
    PATHFINDER_UNITS
}

pub fn find(id: &str) -> Option<&'static PathfinderUnit> {
    PATHFINDER_UNITS.iter().find(|u| u.id == id)
}
