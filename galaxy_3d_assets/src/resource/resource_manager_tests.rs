/// Tests for ResourceManager
///
/// Filesystem fixtures live in temporary directories; the manager's working
/// directory is pointed at them so that `<tmp>/Resources` is the only root.

use super::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use crate::resource::base::share;
use crate::resource::data::DataResource;
use crate::resource::multi::SubResourceDesc;
use crate::resource::texture::{Texture, TextureFormat};

// ============================================================================
// Helper Functions
// ============================================================================

/// Raw loader for `.cnt` files counting its invocations
struct CountingLoader {
    loads: Arc<AtomicUsize>,
}

impl ResourceLoader for CountingLoader {
    fn extension(&self) -> &str {
        ".cnt"
    }

    fn resource_kind(&self) -> ResourceKind {
        ResourceKind::Data
    }

    fn load(&self, resource: &mut dyn Resource, file: &File) -> Result<()> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        let data = resource
            .downcast_mut::<DataResource>()
            .ok_or_else(|| Error::InvalidResource("not data".to_string()))?;
        data.set_bytes(file.read_bytes()?);
        Ok(())
    }
}

/// Container format: every `.pack` file holds an "albedo" texture and a
/// "table" data blob
struct PackLoader;

impl ResourceLoader for PackLoader {
    fn extension(&self) -> &str {
        ".pack"
    }

    fn resource_kind(&self) -> ResourceKind {
        ResourceKind::Multi
    }

    fn load(&self, resource: &mut dyn Resource, file: &File) -> Result<()> {
        let slots = self.explore(file)?;
        if let Some(multi) = resource.downcast_mut::<crate::resource::multi::MultiResource>() {
            multi.set_slots(slots);
        }
        Ok(())
    }

    fn load_sub_resource(&self, resource: &mut dyn Resource, _file: &File, slot: &str) -> Result<()> {
        if let Some(texture) = resource.downcast_mut::<Texture>() {
            if slot == "albedo" {
                return texture.set_pixels(1, 1, TextureFormat::Rgba8, vec![1, 2, 3, 4]);
            }
        }
        if let Some(data) = resource.downcast_mut::<DataResource>() {
            if slot == "table" {
                data.set_bytes(vec![0; 8]);
                return Ok(());
            }
        }
        Err(Error::NotFound(format!("slot '{}'", slot)))
    }

    fn explore(&self, _file: &File) -> Result<Vec<SubResourceDesc>> {
        Ok(vec![
            SubResourceDesc::new("Albedo", ResourceKind::Texture),
            SubResourceDesc::new("table", ResourceKind::Data),
        ])
    }
}

fn workspace() -> (tempfile::TempDir, ResourceManager) {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("Resources")).unwrap();
    let mut manager = ResourceManager::new();
    manager.set_working_directory(dir.path());
    manager.register_resource_loader(DataLoader::new());
    manager.register_resource_saver(DataSaver::new());
    (dir, manager)
}

fn write(dir: &Path, relative: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join("Resources").join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, bytes).unwrap();
    path
}

fn data(size: usize) -> SharedResource {
    share(DataResource::with_bytes(vec![0; size]))
}

// ============================================================================
// Construction & initialization
// ============================================================================

#[test]
fn test_new_manager_defaults() {
    let manager = ResourceManager::new();
    assert_eq!(manager.memory_limit(), DEFAULT_MEMORY_LIMIT);
    assert_eq!(manager.priority_behaviour(), PriorityBehaviour::LeastRecentlyUsed);
    assert_eq!(manager.resource_count(), 0);
    assert_eq!(manager.total_memory_usage(), 0);
    assert_eq!(manager.loaders().number_of_resource_loaders(), 0);
}

#[test]
fn test_initialize_applies_config_and_discovers() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "data/table.bin", &[1, 2, 3]);
    write(dir.path(), "materials/grass.gmat", b"{}");
    write(dir.path(), "notes.txt", b"ignored");

    let config = EngineConfig {
        memory_limit: 4096,
        priority_behaviour: PriorityBehaviour::SizeDescending,
        ..EngineConfig::default()
    };
    let mut manager = ResourceManager::new();
    manager.set_working_directory(dir.path());
    manager.initialize(&config).unwrap();

    assert_eq!(manager.memory_limit(), 4096);
    assert_eq!(manager.priority_behaviour(), PriorityBehaviour::SizeDescending);
    assert!(manager.is_file_type_supported(".bin"));
    assert!(manager.is_file_type_supported(".gmat"));
    assert!(manager.savers().is_extension_supported(".gmat"));
    assert_eq!(manager.resource_count(), 2);
    assert!(manager.does_exist("data/table"));
    assert!(manager.does_exist("materials/grass"));
    assert_eq!(manager.resource_details("materials/grass").unwrap().kind(), ResourceKind::Material);
}

#[test]
fn test_initialize_keeps_caller_strategies() {
    let dir = tempfile::tempdir().unwrap();
    let mut manager = ResourceManager::new();
    manager.set_working_directory(dir.path());
    assert!(manager.register_resource_loader(DataLoader::with_extension(".gmat")));
    manager.initialize(&EngineConfig::default()).unwrap();
    assert_eq!(manager.loaders().resource_type(".gmat"), ResourceKind::Data);
}

#[test]
fn test_initialize_rejects_empty_directory_name() {
    let config = EngineConfig {
        resource_directory: "  ".to_string(),
        ..EngineConfig::default()
    };
    let mut manager = ResourceManager::new();
    let err = manager.initialize(&config).unwrap_err();
    assert!(matches!(err, Error::InitializationFailed(_)));
}

// ============================================================================
// Lookup & loading
// ============================================================================

#[test]
fn test_unknown_name_returns_none() {
    let (_dir, mut manager) = workspace();
    assert!(manager.get_resource("does/not/exist").is_none());
    assert_eq!(manager.resource_count(), 0);
}

#[test]
fn test_get_resource_loads_on_demand() {
    let (dir, mut manager) = workspace();
    write(dir.path(), "data/table.bin", &[5; 10]);
    assert_eq!(manager.force_source_refresh(), 1);
    assert!(!manager.is_in_memory("data/table"));

    let resource = manager.get_resource("data/table").unwrap();
    let guard = lock_resource(&resource);
    assert!(guard.is_in_memory());
    assert_eq!(guard.mapping_name(), "data/table");
    assert_eq!(guard.downcast_ref::<DataResource>().unwrap().bytes(), &[5; 10]);
    drop(guard);

    assert!(manager.is_in_memory("data/table"));
    assert_eq!(manager.total_memory_usage(), 10);
    assert_eq!(manager.memory_usage(ResourceKind::Data), 10);
    assert_eq!(manager.loaded_resource_count(), 1);
}

#[test]
fn test_refetch_returns_same_handle_without_reloading() {
    let (dir, mut manager) = workspace();
    let loads = Arc::new(AtomicUsize::new(0));
    manager.register_resource_loader(CountingLoader { loads: loads.clone() });
    write(dir.path(), "counted.cnt", b"abc");
    manager.force_source_refresh();

    let first = manager.get_resource("counted").unwrap();
    let second = manager.get_resource("counted").unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(loads.load(Ordering::SeqCst), 1);
    assert_eq!(manager.resource_details("counted").unwrap().access_count(), 2);
}

#[test]
fn test_lookup_is_case_insensitive() {
    let (dir, mut manager) = workspace();
    write(dir.path(), "Textures/Grass.bin", &[1]);
    manager.force_source_refresh();

    let upper = manager.get_resource("Textures/Grass").unwrap();
    let lower = manager.get_resource("textures/grass").unwrap();
    assert!(Arc::ptr_eq(&upper, &lower));
    assert!(manager.does_exist("TEXTURES\\GRASS"));
}

#[test]
fn test_details_query_is_not_a_use() {
    let (_dir, mut manager) = workspace();
    manager.add_resource("blob", None, Some(data(4)), ResourceKind::Data).unwrap();
    manager.get_resource("blob").unwrap();
    let before = manager.resource_details("blob").unwrap().access_count();
    let _ = manager.resource_details("blob");
    let _ = manager.is_in_memory("blob");
    assert_eq!(manager.resource_details("blob").unwrap().access_count(), before);
}

#[test]
fn test_unsupported_extension_leaves_catalog_unchanged() {
    let (dir, mut manager) = workspace();
    let path = write(dir.path(), "model.xyz", b"?");
    manager.add_resource("model", Some(File::new(&path)), None, ResourceKind::Mesh).unwrap();
    let count = manager.resource_count();

    assert!(manager.get_resource("model").is_none());
    assert_eq!(manager.resource_count(), count);
    assert!(manager.resource_details("model").unwrap().resource().is_none());
    assert_eq!(manager.total_memory_usage(), 0);
}

#[test]
fn test_missing_backing_file() {
    let (dir, mut manager) = workspace();
    let path = write(dir.path(), "gone.bin", &[1, 2]);
    manager.force_source_refresh();
    std::fs::remove_file(&path).unwrap();

    assert!(manager.get_resource("gone").is_none());
    assert!(manager.does_exist("gone"));
    assert!(manager.resource_details("gone").unwrap().resource().is_none());
}

#[test]
fn test_get_resource_or_missing() {
    let (_dir, mut manager) = workspace();
    let fallback = manager.get_resource_or_missing("nope", ResourceKind::Texture).unwrap();
    assert!(Arc::ptr_eq(&fallback, &manager.missing_resource(ResourceKind::Texture).unwrap()));
    assert!(manager.get_resource_or_missing("nope", ResourceKind::Undefined).is_none());
}

#[test]
fn test_force_load_reloads_from_disk() {
    let (dir, mut manager) = workspace();
    let path = write(dir.path(), "table.bin", &[1; 4]);
    manager.force_source_refresh();
    let first = manager.get_resource("table").unwrap();

    std::fs::write(&path, [2u8; 6]).unwrap();
    let reloaded = manager.force_load_resource("table").unwrap();

    assert!(Arc::ptr_eq(&first, &reloaded));
    assert_eq!(lock_resource(&reloaded).size(), 6);
    assert_eq!(manager.total_memory_usage(), 6);
    assert!(matches!(manager.force_load_resource("unknown"), Err(Error::NotFound(_))));
}

#[test]
fn test_force_load_keeps_resident_copy_when_file_is_gone() {
    let (dir, mut manager) = workspace();
    let path = write(dir.path(), "blob.bin", &[5; 16]);
    manager.force_source_refresh();
    let blob = manager.get_resource("blob").unwrap();

    std::fs::remove_file(&path).unwrap();
    assert!(matches!(manager.force_load_resource("blob"), Err(Error::NotFound(_))));

    assert!(manager.is_in_memory("blob"));
    assert!(lock_resource(&blob).is_in_memory());
    assert_eq!(lock_resource(&blob).downcast_ref::<DataResource>().unwrap().bytes(), &[5; 16]);
    assert_eq!(manager.total_memory_usage(), 16);
}

// ============================================================================
// Registration
// ============================================================================

#[test]
fn test_add_resource_accounts_resident_payload() {
    let (_dir, mut manager) = workspace();
    let blob = data(32);
    manager.add_resource("Generated/Blob", None, Some(blob.clone()), ResourceKind::Data).unwrap();

    assert!(manager.is_in_memory("generated/blob"));
    assert_eq!(manager.total_memory_usage(), 32);
    assert_eq!(lock_resource(&blob).mapping_name(), "generated/blob");
    assert_eq!(
        *manager.resource_details("generated/blob").unwrap().origin(),
        ResourceOrigin::Programmatic
    );
}

#[test]
fn test_add_resource_rejects_occupied_name() {
    let (_dir, mut manager) = workspace();
    manager.add_resource("blob", None, Some(data(1)), ResourceKind::Data).unwrap();
    let err = manager.add_resource("BLOB", None, Some(data(1)), ResourceKind::Data).unwrap_err();
    assert!(matches!(err, Error::AlreadyExists(_)));
    assert_eq!(manager.total_memory_usage(), 1);
}

#[test]
fn test_add_resource_rejects_handle_under_second_name() {
    let (_dir, mut manager) = workspace();
    let blob = data(100);
    manager.add_resource("a", None, Some(blob.clone()), ResourceKind::Data).unwrap();

    let err = manager.add_resource("b", None, Some(blob.clone()), ResourceKind::Data).unwrap_err();
    assert!(matches!(err, Error::AlreadyExists(_)));
    assert!(!manager.does_exist("b"));
    assert_eq!(manager.total_memory_usage(), 100);
    assert_eq!(lock_resource(&blob).mapping_name(), "a");

    assert!(manager.force_unload_resource("a"));
    assert_eq!(manager.total_memory_usage(), 0);
}

#[test]
fn test_add_resource_adopts_unbound_entry() {
    let (dir, mut manager) = workspace();
    write(dir.path(), "blob.bin", &[0; 3]);
    manager.force_source_refresh();

    let replacement = data(5);
    manager.add_resource("blob", None, Some(replacement.clone()), ResourceKind::Data).unwrap();
    let fetched = manager.get_resource("blob").unwrap();
    assert!(Arc::ptr_eq(&fetched, &replacement));
    assert!(manager.resource_file("blob").is_some());
}

#[test]
fn test_add_resource_kind_checks() {
    let (_dir, mut manager) = workspace();
    assert!(manager.add_resource("tex", None, Some(data(1)), ResourceKind::Texture).is_err());
    assert!(manager.add_resource("undef", None, None, ResourceKind::Undefined).is_err());
    assert!(manager.add_resource("", None, None, ResourceKind::Data).is_err());
    assert_eq!(manager.resource_count(), 0);
}

#[test]
fn test_type_mismatch_falls_back_to_sub_resource() {
    let (dir, mut manager) = workspace();
    manager.register_resource_loader(PackLoader);
    let path = write(dir.path(), "ship.pack", b"pack");

    manager.add_resource("ship:albedo", Some(File::new(&path)), None, ResourceKind::Texture).unwrap();
    let texture = manager.get_resource("ship:albedo").unwrap();
    let guard = lock_resource(&texture);
    assert_eq!(guard.kind(), ResourceKind::Texture);
    assert_eq!(guard.downcast_ref::<Texture>().unwrap().pixels(), &[1, 2, 3, 4]);
}

// ============================================================================
// Unloading
// ============================================================================

#[test]
fn test_force_unload_keeps_identity() {
    let (dir, mut manager) = workspace();
    write(dir.path(), "table.bin", &[9; 12]);
    manager.force_source_refresh();

    let first = manager.get_resource("table").unwrap();
    assert!(manager.force_unload_resource("TABLE"));
    assert!(!lock_resource(&first).is_in_memory());
    assert_eq!(manager.total_memory_usage(), 0);
    assert_eq!(manager.resource_details("table").unwrap().access_count(), 0);
    assert!(!manager.force_unload_resource("table"));

    let second = manager.get_resource("table").unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert!(lock_resource(&second).is_in_memory());
}

#[test]
fn test_unload_all_keeps_entries() {
    let (_dir, mut manager) = workspace();
    manager.add_resource("a", None, Some(data(10)), ResourceKind::Data).unwrap();
    manager.add_resource("b", None, Some(data(20)), ResourceKind::Data).unwrap();

    manager.unload_all_resources();
    assert_eq!(manager.resource_count(), 2);
    assert_eq!(manager.loaded_resource_count(), 0);
    assert_eq!(manager.total_memory_usage(), 0);
}

#[test]
fn test_clear_catalog_and_remove() {
    let (_dir, mut manager) = workspace();
    manager.add_resource("a", None, Some(data(10)), ResourceKind::Data).unwrap();
    manager.add_resource("b", None, Some(data(20)), ResourceKind::Data).unwrap();

    assert!(manager.remove_resource("A"));
    assert!(!manager.remove_resource("a"));
    assert_eq!(manager.total_memory_usage(), 20);

    manager.clear_catalog();
    assert_eq!(manager.resource_count(), 0);
    assert_eq!(manager.total_memory_usage(), 0);
    assert!(!manager.does_exist("b"));
}

// ============================================================================
// Eviction
// ============================================================================

fn three_resident(manager: &mut ResourceManager) {
    for name in ["a", "b", "c"] {
        manager.add_resource(name, None, Some(data(100)), ResourceKind::Data).unwrap();
    }
}

#[test]
fn test_lru_evicts_least_recently_touched() {
    let (_dir, mut manager) = workspace();
    three_resident(&mut manager);
    for name in ["a", "b", "c", "a"] {
        manager.get_resource(name).unwrap();
    }

    manager.set_memory_limit(250);
    manager.free_memory_space();

    assert!(manager.is_in_memory("a"));
    assert!(!manager.is_in_memory("b"));
    assert!(manager.is_in_memory("c"));
    assert_eq!(manager.total_memory_usage(), 200);
}

#[test]
fn test_lfu_evicts_least_used() {
    let (_dir, mut manager) = workspace();
    three_resident(&mut manager);
    manager.set_priority_behaviour(PriorityBehaviour::LeastFrequentlyUsed);
    for name in ["a", "a", "b", "c", "c", "c"] {
        manager.get_resource(name).unwrap();
    }

    manager.set_memory_limit(250);
    manager.free_memory_space();
    assert!(!manager.is_in_memory("b"));
    assert_eq!(manager.loaded_resource_count(), 2);
}

#[test]
fn test_size_policies() {
    let (_dir, mut manager) = workspace();
    manager.add_resource("small", None, Some(data(10)), ResourceKind::Data).unwrap();
    manager.add_resource("medium", None, Some(data(50)), ResourceKind::Data).unwrap();
    manager.add_resource("large", None, Some(data(90)), ResourceKind::Data).unwrap();

    manager.set_priority_behaviour(PriorityBehaviour::SizeDescending);
    manager.set_memory_limit(100);
    manager.free_memory_space();
    assert!(!manager.is_in_memory("large"));
    assert_eq!(manager.total_memory_usage(), 60);

    manager.set_priority_behaviour(PriorityBehaviour::SizeAscending);
    manager.set_memory_limit(55);
    manager.free_memory_space();
    assert!(!manager.is_in_memory("small"));
    assert!(manager.is_in_memory("medium"));
}

#[test]
fn test_eviction_spares_the_resource_being_fetched() {
    let (dir, mut manager) = workspace();
    write(dir.path(), "big.bin", &[0; 100]);
    manager.force_source_refresh();
    manager.add_resource("old", None, Some(data(100)), ResourceKind::Data).unwrap();
    manager.get_resource("old").unwrap();
    manager.set_memory_limit(150);

    let big = manager.get_resource("big").unwrap();
    assert!(lock_resource(&big).is_in_memory());
    assert!(!manager.is_in_memory("old"));
    assert!(manager.total_memory_usage() <= manager.memory_limit());
}

#[test]
fn test_unreachable_budget_is_relaxed() {
    let (_dir, mut manager) = workspace();
    manager.set_memory_limit(40);
    manager.add_resource("huge", None, Some(data(100)), ResourceKind::Data).unwrap();

    // The only resident resource is protected while it is being added
    assert!(manager.is_in_memory("huge"));
    assert_eq!(manager.memory_limit(), 80);

    manager.free_memory_space();
    assert!(!manager.is_in_memory("huge"));
    assert_eq!(manager.total_memory_usage(), 0);
}

#[test]
fn test_zero_budget_uses_bootstrap_limit() {
    let (_dir, mut manager) = workspace();
    manager.set_memory_limit(0);
    manager.add_resource("blob", None, Some(data(8)), ResourceKind::Data).unwrap();
    assert_eq!(manager.memory_limit(), BOOTSTRAP_MEMORY_LIMIT);
}

#[test]
fn test_budget_holds_after_every_fetch() {
    let (dir, mut manager) = workspace();
    for index in 0..8 {
        write(dir.path(), &format!("chunk{}.bin", index), &vec![0; 64]);
    }
    manager.force_source_refresh();
    manager.set_memory_limit(200);

    for round in 0..3 {
        for index in 0..8 {
            let name = format!("chunk{}", (index + round) % 8);
            assert!(manager.get_resource(&name).is_some());
            assert!(manager.total_memory_usage() <= manager.memory_limit());
        }
    }
    assert_eq!(manager.memory_limit(), 200);
}

// ============================================================================
// Source refresh & containers
// ============================================================================

#[test]
fn test_refresh_drops_vanished_files() {
    let (dir, mut manager) = workspace();
    let path = write(dir.path(), "temp.bin", &[0; 16]);
    write(dir.path(), "keep.bin", &[0; 2]);
    manager.add_resource("manual", None, Some(data(4)), ResourceKind::Data).unwrap();
    manager.force_source_refresh();
    let temp = manager.get_resource("temp").unwrap();
    assert_eq!(manager.total_memory_usage(), 20);

    std::fs::remove_file(&path).unwrap();
    assert_eq!(manager.force_source_refresh(), 0);

    assert!(!manager.does_exist("temp"));
    assert!(!lock_resource(&temp).is_in_memory());
    assert!(manager.does_exist("keep"));
    assert!(manager.does_exist("manual"));
    assert_eq!(manager.total_memory_usage(), 4);
}

#[test]
fn test_blacklist_and_extension_sensitivity_apply_on_refresh() {
    let (dir, mut manager) = workspace();
    write(dir.path(), "table.bin", &[1]);

    manager.set_source_blacklist([".bin"]);
    assert_eq!(manager.force_source_refresh(), 0);
    assert!(!manager.does_exist("table"));

    manager.set_source_blacklist(Vec::<String>::new());
    manager.set_source_extension_sensitive(true);
    assert_eq!(manager.force_source_refresh(), 1);
    assert!(manager.does_exist("table.bin"));
    assert!(!manager.does_exist("table"));
}

#[test]
fn test_source_directory_change() {
    let (dir, mut manager) = workspace();
    let assets = dir.path().join("Assets");
    std::fs::create_dir_all(&assets).unwrap();
    std::fs::write(assets.join("alt.bin"), [1u8]).unwrap();
    write(dir.path(), "main.bin", &[1]);

    manager.force_source_refresh();
    assert!(manager.does_exist("main"));

    manager.set_source_directory("Assets");
    manager.force_source_refresh();
    assert!(manager.does_exist("alt"));
    assert!(!manager.does_exist("main"));
}

#[test]
fn test_containers_are_explored_into_slots() {
    let (dir, mut manager) = workspace();
    manager.register_resource_loader(PackLoader);
    let path = write(dir.path(), "models/ship.pack", b"pack");

    assert_eq!(manager.force_source_refresh(), 3);
    assert_eq!(manager.resource_details("models/ship").unwrap().kind(), ResourceKind::Multi);
    assert_eq!(
        *manager.resource_details("models/ship:albedo").unwrap().origin(),
        ResourceOrigin::SubResource { container: "models/ship".to_string(), slot: "albedo".to_string() }
    );

    let texture = manager.get_resource("models/ship:albedo").unwrap();
    assert_eq!(lock_resource(&texture).kind(), ResourceKind::Texture);
    let table = manager.get_resource("models/ship:table").unwrap();
    assert_eq!(lock_resource(&table).size(), 8);
    assert_eq!(manager.memory_usage(ResourceKind::Texture), 4);

    let file = File::new(&path);
    assert_eq!(manager.resource_mapping_name(&file, Some(ResourceKind::Texture)).as_deref(), Some("models/ship:albedo"));
    assert_eq!(manager.resource_mapping_name(&file, Some(ResourceKind::Data)).as_deref(), Some("models/ship:table"));
    assert_eq!(manager.resource_mapping_name(&file, None).as_deref(), Some("models/ship"));

    std::fs::remove_file(&path).unwrap();
    manager.force_source_refresh();
    assert_eq!(manager.resource_count(), 0);
    assert_eq!(manager.total_memory_usage(), 0);
}

#[test]
fn test_container_refresh_keeps_programmatic_slot_file() {
    let (dir, mut manager) = workspace();
    manager.register_resource_loader(PackLoader);
    let own = write(dir.path(), "own/table.bin", &[1; 3]);
    manager
        .add_resource("models/ship:table", Some(File::new(&own)), Some(data(3)), ResourceKind::Data)
        .unwrap();
    write(dir.path(), "models/ship.pack", b"pack");

    manager.force_source_refresh();
    manager.force_source_refresh();

    let details = manager.resource_details("models/ship:table").unwrap();
    assert_eq!(*details.origin(), ResourceOrigin::Programmatic);
    assert_eq!(manager.resource_file("models/ship:table").unwrap().full_path(), own);
    assert!(manager.does_exist("models/ship:albedo"));
}

#[test]
fn test_resources_of_type_is_sorted_and_lazy() {
    let (dir, mut manager) = workspace();
    write(dir.path(), "b.bin", &[1]);
    write(dir.path(), "a.bin", &[1]);
    manager.add_resource("tex", None, Some(share(Texture::solid(1, 1, [0; 4]))), ResourceKind::Texture).unwrap();
    manager.force_source_refresh();

    assert_eq!(manager.resources_of_type(ResourceKind::Data), vec!["a", "b"]);
    assert_eq!(manager.resources_of_type(ResourceKind::Texture), vec!["tex"]);
    assert_eq!(manager.loaded_resource_count(), 1);
}

// ============================================================================
// Saving & placeholders
// ============================================================================

#[test]
fn test_save_resource() {
    let (dir, mut manager) = workspace();
    let blob = share(DataResource::with_bytes(b"payload".to_vec()));
    manager.add_resource("blob", None, Some(blob.clone()), ResourceKind::Data).unwrap();

    let mut file = File::new(dir.path().join("out").join("blob.bin"));
    manager.save_resource(&blob, &mut file).unwrap();
    assert_eq!(std::fs::read(file.full_path()).unwrap(), b"payload");

    manager.force_unload_resource("blob");
    assert!(manager.save_resource(&blob, &mut file).is_err());
}

#[test]
fn test_placeholders() {
    let manager = ResourceManager::new();

    let missing = manager.missing_resource(ResourceKind::Texture).unwrap();
    {
        let guard = lock_resource(&missing);
        assert!(guard.is_in_memory());
        let texture = guard.downcast_ref::<Texture>().unwrap();
        assert_eq!((texture.width(), texture.height()), (2, 2));
        assert_eq!(texture.pixel(0, 0), Some(&[255, 0, 255, 255][..]));
        assert_eq!(texture.pixel(1, 0), Some(&[0, 0, 0, 255][..]));
    }

    let mesh = manager.missing_resource(ResourceKind::Mesh).unwrap();
    assert_eq!(lock_resource(&mesh).size(), 152);

    let empty = manager.empty_resource(ResourceKind::Data).unwrap();
    assert!(lock_resource(&empty).is_in_memory());
    assert_eq!(lock_resource(&empty).size(), 0);
    assert!(manager.empty_resource(ResourceKind::Undefined).is_none());
    assert_eq!(manager.total_memory_usage(), 0);
}
