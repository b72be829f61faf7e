use crate::components::Component;
use crate::impl_component;

mod entity_tests;
mod world_tests;

pub fn init_logging() {
	let _ = env_logger::builder().is_test(true).try_init();
}

pub trait Shape {
	fn area(&self) -> f32;
}

pub trait Drawable {
	fn layer(&self) -> u32;
	fn set_layer(&mut self, layer: u32);
}

#[derive(Component, PartialEq, Debug)]
#[capabilities(Shape, Drawable)]
pub struct Circle {
	pub radius: f32,
	pub layer: u32,
}

impl Shape for Circle {
	fn area(&self) -> f32 {
		std::f32::consts::PI * self.radius * self.radius
	}
}

impl Drawable for Circle {
	fn layer(&self) -> u32 {
		self.layer
	}

	fn set_layer(&mut self, layer: u32) {
		self.layer = layer;
	}
}

#[derive(Component, PartialEq, Debug)]
#[capabilities(Shape)]
pub struct Square {
	pub side: f32,
}

impl Shape for Square {
	fn area(&self) -> f32 {
		self.side * self.side
	}
}

#[derive(Component, Default, PartialEq, Debug)]
pub struct Position {
	pub x: f32,
	pub y: f32,
}

#[derive(Component, Default, PartialEq, Debug)]
pub struct Velocity {
	pub x: f32,
	pub y: f32,
}

#[derive(PartialEq, Debug)]
pub struct Health(pub u32);
impl_component!(Health);

#[derive(PartialEq, Debug)]
pub struct Sprite {
	pub layer: u32,
}
impl_component!(Sprite: Drawable);

impl Drawable for Sprite {
	fn layer(&self) -> u32 {
		self.layer
	}

	fn set_layer(&mut self, layer: u32) {
		self.layer = layer;
	}
}
