//! End-to-end filtering through the public scene API.

use labgrid_model::{
    decode_label_target, Axis, GridConfig, GridDims, GridScene, InputEvent, Lattice, Selection,
    Visibility,
};

fn scene_5x5x5() -> GridScene {
    GridScene::new(GridConfig {
        dims: GridDims::new(5, 5, 5),
        lattice: Lattice::new(0.5, 0.8),
        ..Default::default()
    })
    .unwrap()
}

fn press_label(scene: &mut GridScene, text: &str) {
    let label = scene
        .labels()
        .iter()
        .find(|l| l.text == text)
        .unwrap_or_else(|| panic!("no label {text:?}"))
        .clone();
    let event = decode_label_target(&label.target()).unwrap();
    scene.handle(event);
}

#[test]
fn clicking_process_3_shows_one_slab() {
    let mut scene = scene_5x5x5();
    press_label(&mut scene, "Process 3");

    assert_eq!(scene.selection(), Selection::Axis { axis: Axis::Z, index: 2 });
    let full: Vec<_> = scene
        .cells()
        .iter()
        .filter(|c| c.visibility == Visibility::FULL)
        .collect();
    assert_eq!(full.len(), 25);
    assert!(full.iter().all(|c| c.coord.z == 2));
    assert_eq!(
        scene
            .cells()
            .iter()
            .filter(|c| c.visibility == Visibility::DIMMED)
            .count(),
        100
    );
}

#[test]
fn label_click_then_double_click_restores_everything() {
    let mut scene = scene_5x5x5();
    press_label(&mut scene, "Clinic 1");
    press_label(&mut scene, "Lab 5");
    scene.handle(InputEvent::DoubleClick);

    assert_eq!(scene.selection(), Selection::None);
    assert!(scene
        .cells()
        .iter()
        .all(|c| c.visibility.opacity == 1.0 && c.visibility.transparent));
}

#[test]
fn each_label_matches_the_cells_it_selects() {
    let mut scene = GridScene::new(GridConfig {
        dims: GridDims::new(3, 4, 2),
        ..Default::default()
    })
    .unwrap();
    let labels = scene.labels().to_vec();

    for label in labels {
        scene.handle(InputEvent::LabelPressed {
            axis: label.axis,
            index: label.index,
        });
        let expected = scene.config().dims.cell_count() / scene.config().dims.size(label.axis);
        assert_eq!(scene.controller().visible_count(), expected, "{}", label.text);

        // The label lines up with the cells it keeps visible
        for cell in scene.cells().iter().filter(|c| c.visibility.is_full()) {
            let slot = label.axis.slot();
            assert!((cell.position[slot] - label.anchor[slot]).abs() < 1e-6);
        }
    }
}

#[test]
fn malformed_click_is_rejected_before_reaching_scene() {
    let mut scene = scene_5x5x5();
    let revision = scene.controller().revision();

    for bad in ["q:1", "x", "z:two"] {
        if let Ok(event) = decode_label_target(bad) {
            scene.handle(event);
        }
    }
    assert_eq!(scene.controller().revision(), revision);
    assert_eq!(scene.selection(), Selection::None);
}
