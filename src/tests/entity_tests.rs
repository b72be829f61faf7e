use crate::tests::{Circle, Drawable, Health, Position, Shape, Sprite, Square, Velocity};
use crate::components::ComponentInfo;
use crate::entities::Entity;
use std::any::TypeId;
use crate::EcsError;

#[test]
pub fn new_entities_are_standalone_and_active() {
	let entity = Entity::new();

	assert!(entity.is_active());
	assert_eq!(entity.world(), None);
	assert_eq!(entity.component_count(), 0);
	assert_eq!(entity.components().count(), 0);
}

#[test]
pub fn ids_increase_monotonically() {
	let ids = (0..64).map(|_| Entity::new().id()).collect::<Vec<_>>();
	assert!(
		ids.windows(2).all(|w| w[0] < w[1]),
		"Entity ids are not strictly increasing"
	);
}

#[test]
pub fn components_are_found_by_concrete_type() {
	let mut entity = Entity::new();
	entity
		.add_component(Position { x: 1.0, y: 2.0 })
		.unwrap()
		.add_component(Health(10))
		.unwrap();

	assert_eq!(entity.get_component::<Position>(), Some(&Position { x: 1.0, y: 2.0 }));
	assert_eq!(entity.get_component::<Health>(), Some(&Health(10)));
	assert_eq!(entity.get_component::<Velocity>(), None);
	assert!(entity.has_component::<Position>());
	assert!(!entity.has_component::<Velocity>());
}

#[test]
pub fn components_are_found_by_capability() {
	let entity = Entity::new().with(Square { side: 3.0 }).unwrap();

	let shape = entity.get_component::<dyn Shape>().expect("Square should be a Shape");
	assert_eq!(shape.area(), 9.0);
	assert!(entity.has_component::<dyn Shape>());
	assert!(!entity.has_component::<dyn Drawable>());
}

#[test]
pub fn capabilities_give_mutable_access() {
	let mut entity = Entity::new().with(Sprite { layer: 1 }).unwrap();

	entity.get_component_mut::<dyn Drawable>().unwrap().set_layer(7);
	assert_eq!(entity.get_component::<Sprite>(), Some(&Sprite { layer: 7 }));
}

#[test]
pub fn duplicate_components_are_rejected() {
	let mut entity = Entity::new();
	entity.add_component(Position { x: 1.0, y: 1.0 }).unwrap();

	let result = entity.add_component(Position { x: 5.0, y: 5.0 }).map(|_| ());
	assert_eq!(
		result,
		Err(EcsError::DuplicateComponent {
			entity: entity.id(),
			component: std::any::type_name::<Position>(),
		})
	);

	assert_eq!(entity.component_count(), 1);
	assert_eq!(entity.get_component::<Position>(), Some(&Position { x: 1.0, y: 1.0 }));
}

#[test]
pub fn components_sharing_a_capability_can_coexist() {
	let entity = Entity::new()
		.with(Circle { radius: 1.0, layer: 0 })
		.unwrap()
		.with(Square { side: 2.0 })
		.unwrap();

	assert_eq!(entity.component_count(), 2);
	// The first component providing the capability wins.
	let shape = entity.get_component::<dyn Shape>().unwrap();
	assert_eq!(shape.area(), std::f32::consts::PI);
}

#[test]
pub fn components_can_be_removed() {
	let mut entity = Entity::new().with(Health(3)).unwrap().with(Position::default()).unwrap();

	assert!(entity.remove_component::<Health>());
	assert!(!entity.remove_component::<Health>());
	assert!(!entity.has_component::<Health>());

	assert_eq!(entity.take_component::<Position>(), Some(Position::default()));
	assert_eq!(entity.component_count(), 0);
}

#[test]
pub fn components_are_listed_in_insertion_order() {
	let entity = Entity::new()
		.with(Velocity::default())
		.unwrap()
		.with(Circle { radius: 2.0, layer: 3 })
		.unwrap()
		.with(Health(1))
		.unwrap();

	let names = entity.components().map(|c| c.type_name()).collect::<Vec<_>>();
	assert_eq!(
		names,
		[
			std::any::type_name::<Velocity>(),
			std::any::type_name::<Circle>(),
			std::any::type_name::<Health>(),
		]
	);

	let circle = entity.components().nth(1).unwrap();
	assert_eq!(circle.owner(), entity.id());
	assert!(circle.provides::<dyn Drawable>());
	assert!(!circle.provides::<Health>());
	assert_eq!(circle.get::<dyn Drawable>().map(|d| d.layer()), Some(3));
}

#[test]
pub fn component_info_reports_the_concrete_type() {
	let info = ComponentInfo::of::<Circle>();
	assert_eq!(info.component_type(), TypeId::of::<Circle>());
	assert_eq!(info.keys().collect::<Vec<_>>(), [TypeId::of::<Circle>(), TypeId::of::<dyn Shape>(), TypeId::of::<dyn Drawable>()]);

	let entity = Entity::new().with(Health(2)).unwrap();
	let health = entity.components().next().unwrap();
	assert_eq!(health.info().component_type(), TypeId::of::<Health>());
}

#[test]
pub fn removal_only_touches_the_requested_type() {
	let mut entity = Entity::new().with(Health(1)).unwrap().with(Sprite { layer: 4 }).unwrap();

	assert!(entity.add_component(Health(2)).is_err());
	assert_eq!(entity.take_component::<Sprite>(), Some(Sprite { layer: 4 }));
	assert!(!entity.has_component::<dyn Drawable>());
	assert_eq!(entity.get_component::<Health>(), Some(&Health(1)));
	assert_eq!(entity.component_count(), 1);
}
