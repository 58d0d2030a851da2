use super::*;
use crate::{CatalogError, RegionCatalog};

fn generated(workspace: &Workspace, region: &str) {
    let result = generator(&workspace.root).generate(region, &downtown());
    assert_eq!(result.successful_tiles, 4);
}

#[rstest]
fn regions_are_listed_with_their_footprint(workspace: Workspace) {
    generated(&workspace, "west");
    generated(&workspace, "east");
    std::fs::create_dir_all(workspace.root.join("scratch")).expect("stray directory");

    let regions = RegionCatalog::new(workspace.root.clone())
        .list_regions()
        .expect("list regions");
    let names: Vec<&str> = regions
        .iter()
        .map(|summary| summary.metadata.name.as_str())
        .collect();
    assert_eq!(names, ["east", "west"]);
    let east = regions.first().expect("east listed");
    assert_eq!(east.tiles_on_disk, 4);
    assert!(east.total_bytes > 0);
}

#[rstest]
fn unreadable_metadata_is_skipped(workspace: Workspace) {
    generated(&workspace, "east");
    std::fs::create_dir_all(workspace.root.join("broken")).expect("region dir");
    std::fs::write(workspace.root.join("broken/metadata.json"), "not json").expect("junk");

    let regions = RegionCatalog::new(workspace.root.clone())
        .list_regions()
        .expect("list regions");
    assert_eq!(regions.len(), 1);
}

#[rstest]
fn missing_tiles_directory_lists_nothing(workspace: Workspace) {
    let catalog = RegionCatalog::new(workspace.root.join("absent"));
    assert!(catalog.list_regions().expect("list regions").is_empty());
}

#[rstest]
fn tiles_are_listed_by_name(workspace: Workspace) {
    generated(&workspace, "east");
    let tiles = RegionCatalog::new(workspace.root.clone())
        .list_tiles("east")
        .expect("list tiles");
    let names: Vec<&str> = tiles.iter().map(|tile| tile.file_name.as_str()).collect();
    assert_eq!(
        names,
        [
            "43.640_-79.380.svg.gz",
            "43.640_-79.390.svg.gz",
            "43.650_-79.380.svg.gz",
            "43.650_-79.390.svg.gz",
        ]
    );
    let first = tiles.first().expect("first tile");
    assert_eq!(first.coordinate.key(), "43.640_-79.380");
}

#[rstest]
fn unknown_regions_are_reported(workspace: Workspace) {
    let catalog = RegionCatalog::new(workspace.root.clone());
    assert!(matches!(
        catalog.list_tiles("nowhere"),
        Err(CatalogError::UnknownRegion(_))
    ));
    assert!(matches!(
        catalog.list_tiles("../etc"),
        Err(CatalogError::InvalidRegionName(_))
    ));
}

#[rstest]
fn deleting_removes_the_region(workspace: Workspace) {
    generated(&workspace, "east");
    let catalog = RegionCatalog::new(workspace.root.clone());

    assert!(catalog.delete_region("east").expect("delete"));
    assert!(!workspace.root.join("east").exists());
    assert!(!catalog.delete_region("east").expect("delete again"));
}
