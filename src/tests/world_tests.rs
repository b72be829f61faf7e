use crate::tests::{Circle, Drawable, Health, Position, Shape, Sprite, Velocity};
use crate::entities::Entity;
use crate::world::World;
use crate::EcsError;

#[test]
pub fn worlds_have_distinct_ids() {
	let a = World::new();
	let b = World::default();
	assert_ne!(a.id(), b.id());
	assert_eq!(a.tick(), 0);
}

#[test]
pub fn spawned_entities_belong_to_the_world() {
	let mut world = World::new();
	let id = world.spawn();

	let entity = world.entity(id).unwrap();
	assert_eq!(entity.world(), Some(world.id()));
	assert_eq!(entity.component_count(), 0);
	assert!(world.contains_entity(id));
	assert_eq!(world.entity_count(), 1);
}

#[test]
pub fn components_are_managed_through_the_world() {
	let mut world = World::new();
	let id = world.spawn();

	world.add_component(id, Position { x: 1.0, y: 2.0 }).unwrap();
	assert!(world.has_component::<Position>(id));
	assert!(!world.has_component::<Velocity>(id));

	world.get_component_mut::<Position>(id).unwrap().x = 5.0;
	assert_eq!(world.get_component::<Position>(id), Some(&Position { x: 5.0, y: 2.0 }));

	assert_eq!(world.take_component::<Position>(id), Some(Position { x: 5.0, y: 2.0 }));
	assert!(!world.remove_component::<Position>(id));
	assert!(world.get_entities_with_component::<Position>().is_empty());
}

#[test]
pub fn operations_on_unknown_entities_fail_gracefully() {
	let mut world = World::new();
	let stranger = Entity::new().id();

	assert_eq!(world.add_component(stranger, Health(1)), Err(EcsError::EntityNotFound(stranger)));
	assert!(!world.remove_entity(stranger));
	assert!(!world.set_active(stranger, false));
	assert!(world.detach_entity(stranger).is_none());
	assert!(world.get_component::<Health>(stranger).is_none());
	assert!(!world.has_component::<Health>(stranger));
}

#[test]
pub fn detached_entities_keep_their_components() {
	let mut world = World::new();
	let id = world.add_entity(Entity::new().with(Health(7)).unwrap()).unwrap();

	let entity = world.detach_entity(id).unwrap();
	assert_eq!(entity.world(), None);
	assert_eq!(entity.get_component::<Health>(), Some(&Health(7)));
	assert!(!world.contains_entity(id));
	assert_eq!(world.bucket_count(), 0);
	assert!(!world.is_indexed::<Health>(id));
}

#[test]
pub fn inactive_entities_remain_indexed() {
	let mut world = World::new();
	let id = world.add_entity(Entity::new().with(Sprite { layer: 2 }).unwrap()).unwrap();
	world.set_active(id, false);

	assert!(world.is_indexed::<Sprite>(id));
	assert!(world.is_indexed::<dyn Drawable>(id));
	assert!(!world.is_indexed::<dyn Shape>(id));
	assert_eq!(world.bucket_count(), 2);
	assert!(world.get_entities_with_component::<dyn Drawable>().is_empty());
}

#[test]
pub fn entities_are_iterated_in_insertion_order() {
	let mut world = World::new();
	let a = world.spawn();
	let b = world.spawn();
	let c = world.spawn();
	world.remove_entity(b);

	let ids = world.entities().map(Entity::id).collect::<Vec<_>>();
	assert_eq!(ids, [a, c]);
}

#[test]
pub fn for_each_mut_updates_every_active_match() {
	let mut world = World::new();
	let circle = world.add_entity(Entity::new().with(Circle { radius: 1.0, layer: 0 }).unwrap()).unwrap();
	let sprite = world.add_entity(Entity::new().with(Sprite { layer: 0 }).unwrap()).unwrap();
	let hidden = world.add_entity(Entity::new().with(Sprite { layer: 0 }).unwrap()).unwrap();
	world.set_active(hidden, false);

	let mut visited = Vec::new();
	world.for_each_mut::<dyn Drawable>(|id, drawable| {
		drawable.set_layer(3);
		visited.push(id);
	});

	assert_eq!(visited, [circle, sprite]);
	assert_eq!(world.get_component::<dyn Drawable>(circle).map(|d| d.layer()), Some(3));
	assert_eq!(world.get_component::<Sprite>(hidden), Some(&Sprite { layer: 0 }));

	let area = world.query::<dyn Shape>().map(|(_, shape)| shape.area()).sum::<f32>();
	assert!((area - std::f32::consts::PI).abs() < f32::EPSILON);
}

#[test]
pub fn side_channel_stores_typed_values() {
	let mut world = World::new();
	world.set_data("gravity", 9.81_f32);

	assert_eq!(world.get_data::<f32>("gravity"), Some(&9.81));
	assert_eq!(world.get_data::<u32>("gravity"), None);
	assert_eq!(world.get_data::<f32>("friction"), None);

	*world.get_data_mut::<f32>("gravity").unwrap() = 1.62;
	world.set_data("gravity", String::from("lunar"));
	assert_eq!(world.get_data::<f32>("gravity"), None);
	assert_eq!(world.get_data::<String>("gravity").map(String::as_str), Some("lunar"));

	assert!(world.remove_data("gravity"));
	assert!(!world.remove_data("gravity"));
}

#[test]
pub fn builder_applies_configuration() {
	let mut world = World::builder()
		.with_entity_capacity(64)
		.with_data("level", 3_u8)
		.with_data("level", 4_u8)
		.build();

	assert_eq!(world.get_data::<u8>("level"), Some(&4));
	assert_eq!(world.entity_count(), 0);
	assert_eq!(world.system_count(), 0);

	world.update(0.5);
	world.update(0.5);
	assert_eq!(world.tick(), 2);
}

#[test]
pub fn debug_output_summarises_the_world() {
	let mut world = World::new();
	world.spawn();

	let output = format!("{:?}", world);
	assert!(output.contains("entities: 1"));
	assert!(output.contains(&format!("{:?}", world.id())));
}
