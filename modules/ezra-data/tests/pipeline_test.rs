//! File-backed load pipeline: directory source → loader → store → filters.

use std::sync::Arc;

use ezra_common::{Category, Config, DataLocation, Phase, Position};
use ezra_data::insights::{self, DashboardSummary};
use ezra_data::{
    source_for, CategoryFilter, CsvLoader, LoadStatus, ProjectQuery, ProjectsStore, Selection,
};

const PROJECTS: &str = "\
id,title,researcher,category,phase,description,latitude,longitude,partners,startDate,completionDate
P1,Acoustic Design,Emily Watson,health-safety,Completed,Quiet rooms,30.26,-97.74,,2023-01,2024-02
P2,Biophilic Learning,Sarah Chen,sustainability,Developmental,Plants,30.30,-97.70,UT Austin | GBC,2024-03,
P3,Broken Row,Nobody,psychology,Completed,Bad coordinates,north,-97.70,,,
P1,Duplicate,Someone,immersive,Completed,Second copy,1,1,,,
X25-RB09,Secret Study,TBD,campus-life,Pre-Research,Hidden,30.20,-97.80,,,
";

const ATTRIBUTES: &str = "\
GEOID20,COLOR,DISTRICT,DISTRICT_N,NAME,Office_Controller,Pfluger_Tier_Rank
1,2,AISD,Austin ISD,Austin,Austin,1
2,,DISD,Dallas ISD,Dallas,UNCATEGORIZED,
3,,HISD,Houston ISD,,Houston,
";

const SHAPES: &str = "\
GEOID20,geometry_type,coordinates
1,Polygon,\"[[[-97.8,30.2],[-97.7,30.2],[-97.7,30.3],[-97.8,30.2]]]\"
2,Polygon,\"[[[-96.8,32.7],[-96.7,32.7],[-96.7,32.8],[-96.8,32.7]]]\"
3,Polygon,\"not json\"
";

fn write_data_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("research_projects.csv"), PROJECTS).unwrap();
    std::fs::write(dir.path().join("district_attributes.csv"), ATTRIBUTES).unwrap();
    std::fs::write(dir.path().join("district_shapes.csv"), SHAPES).unwrap();
    dir
}

fn loader_for(dir: &tempfile::TempDir) -> CsvLoader {
    let config = Config {
        data: DataLocation::Dir(dir.path().to_path_buf()),
        ..Config::default()
    };
    CsvLoader::from_config(source_for(&config.data), &config)
}

#[tokio::test]
async fn loads_projects_from_directory() {
    let dir = write_data_dir();
    let loaded = loader_for(&dir).load_projects().await.unwrap();

    let ids: Vec<&str> = loaded.projects.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["P1", "P2", "X25-RB09"]);
    assert_eq!(loaded.dropped, 2);

    let p1 = &loaded.projects[0];
    assert_eq!(p1.title, "Acoustic Design");
    assert_eq!(p1.category, Category::HealthSafety);
    assert_eq!(p1.phase, Phase::Completed);
    assert_eq!(p1.position, Position::new(30.26, -97.74));
    assert_eq!(p1.partners, None);

    let p2 = &loaded.projects[1];
    assert_eq!(
        p2.partners,
        Some(vec!["UT Austin".to_string(), "GBC".to_string()])
    );
    assert!(loaded.projects[2].is_confidential());
    assert_eq!(loaded.projects[2].public_title(), "CONFIDENTIAL");
}

#[tokio::test]
async fn loads_only_controlled_districts_with_valid_shapes() {
    let dir = write_data_dir();
    let districts = loader_for(&dir).load_districts().await;
    assert_eq!(districts.len(), 1);
    assert_eq!(districts[0].geoid, "1");
    assert_eq!(districts[0].office, "Austin");
}

#[tokio::test]
async fn missing_directory_fails_projects_but_not_districts() {
    let dir = tempfile::tempdir().unwrap();
    let loader = loader_for(&dir);
    assert!(loader.load_projects().await.is_err());
    assert!(loader.load_districts().await.is_empty());
}

#[tokio::test]
async fn store_feeds_filters_and_insights() {
    let dir = write_data_dir();
    let store = ProjectsStore::new(Arc::new(loader_for(&dir)));
    let snapshot = store.refresh().await;
    assert_eq!(snapshot.status, LoadStatus::Loaded);

    let query = ProjectQuery::new("emily", CategoryFilter::All);
    let hits = query.apply(&snapshot.projects);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "P1");

    let mut selection = Selection::default();
    selection.select("P2");
    assert_eq!(
        selection.project(&snapshot.projects).map(|p| p.title.as_str()),
        Some("Biophilic Learning")
    );

    let summary = DashboardSummary::from_projects(&snapshot.projects);
    assert_eq!(summary.project_count, 3);
    assert_eq!(summary.researcher_count, 2);

    let completed = insights::portfolio(&snapshot.projects, &CategoryFilter::All);
    assert_eq!(completed.len(), 1);
}
