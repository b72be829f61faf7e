use criterion::*;
use keystone_ecs::prelude::*;

const COUNT: usize = 10000;

trait Movable {
    fn advance(&mut self, delta_time: f32);
}

#[derive(Default, Component)]
#[capabilities(Movable)]
struct Translation {
    position: [f32; 3],
    velocity: [f32; 3],
}

impl Movable for Translation {
    fn advance(&mut self, delta_time: f32) {
        for (p, v) in self.position.iter_mut().zip(self.velocity) {
            *p += v * delta_time;
        }
    }
}

#[derive(Default, Component)]
#[capabilities(Movable)]
struct Rotation {
    angle: f32,
    speed: f32,
}

impl Movable for Rotation {
    fn advance(&mut self, delta_time: f32) {
        self.angle += self.speed * delta_time;
    }
}

#[derive(Default, Component)]
struct Tag;

fn populate(world: &mut World) {
    for i in 0..COUNT {
        let mut entity = Entity::new();
        entity.add_component(Translation::default()).unwrap();
        if i % 2 == 0 {
            entity.add_component(Rotation::default()).unwrap();
        }
        if i % 10 == 0 {
            entity.add_component(Tag).unwrap();
        }
        world.add_entity(entity).unwrap();
    }
}

struct MovementSystem;

impl System for MovementSystem {
    fn update(&mut self, world: &mut World, delta_time: f32) {
        world.for_each_mut::<dyn Movable>(|_, movable| movable.advance(delta_time));
    }
}

fn create_entities(c: &mut Criterion) {
    c.bench_function("Create entities", |b| {
        b.iter_batched(
            || World::builder().with_entity_capacity(COUNT).build(),
            |mut world| populate(&mut world),
            BatchSize::PerIteration,
        );
    });
}

fn destroy_entities(c: &mut Criterion) {
    c.bench_function("Destroy entities", |b| {
        b.iter_batched(
            || {
                let mut world = World::new();
                populate(&mut world);
                let ids = world.entities().map(Entity::id).collect::<Vec<_>>();
                (world, ids)
            },
            |(mut world, ids)| {
                for id in ids {
                    world.remove_entity(id);
                }
            },
            BatchSize::PerIteration,
        );
    });
}

fn query_entities(c: &mut Criterion) {
    let mut group = c.benchmark_group("Query entities");
    let mut world = World::new();
    populate(&mut world);

    group.bench_function("Concrete type", |b| {
        b.iter(|| black_box(world.get_entities_with_component::<Rotation>()));
    });

    group.bench_function("Capability", |b| {
        b.iter(|| black_box(world.get_entities_with_component::<dyn Movable>()));
    });

    group.bench_function("Composite", |b| {
        b.iter(|| black_box(world.get_entities_with_components::<(&Tag, &Rotation, &dyn Movable)>()));
    });
    group.finish();
}

fn update_systems(c: &mut Criterion) {
    c.bench_function("Update systems", |b| {
        let mut world = World::builder().with_system(MovementSystem).build();
        populate(&mut world);
        b.iter(|| world.update(0.016));
    });
}

criterion_group!(
    benchmarks,
    create_entities,
    destroy_entities,
    query_entities,
    update_systems,
);
criterion_main!(benchmarks);
