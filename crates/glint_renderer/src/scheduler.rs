//! Progressive, cooperative render scheduling.
//!
//! [`Scheduler::render`] does not render anything itself. It prepares the
//! frame and hands a [`RenderJob`] to the host's [`TaskQueue`]. Each time the
//! host runs the job it renders one chunk and, if work remains, defers itself
//! again. Starting another render advances a shared generation counter; jobs
//! from older generations stop at their next chunk without writing.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use glint_math::RayGenerator;

use crate::{
    generate_chunks, render_chunk, Chunk, FrameSink, RenderContext, Settings, World, CHUNK_SIZE,
};

/// Shared render generation counter.
///
/// Clones observe the same counter.
#[derive(Clone, Debug, Default)]
pub struct RenderGeneration(Arc<AtomicU64>);

impl RenderGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }

    /// Start a new generation and return its token.
    pub fn advance(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }
}

/// Outcome of running a job once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    /// A chunk was rendered and more remain
    Pending { completed: usize, total: usize },
    /// The last chunk was rendered
    Finished,
    /// A newer render started; nothing was written
    Superseded,
}

/// Where jobs wait between chunks.
pub trait TaskQueue {
    fn defer(&mut self, job: RenderJob);
}

/// One frame's worth of remaining chunks.
#[derive(Debug)]
pub struct RenderJob {
    generation: RenderGeneration,
    token: u64,
    settings: Settings,
    chunks: Vec<Chunk>,
    next: usize,
    /// Prepared on the first chunk and reused for the rest
    rays: Option<RayGenerator>,
}

impl RenderJob {
    /// False once a newer render has started.
    pub fn is_current(&self) -> bool {
        self.generation.current() == self.token
    }

    /// (completed, total) chunk counts.
    pub fn progress(&self) -> (usize, usize) {
        (self.next, self.chunks.len())
    }

    /// Render the next chunk into `sink`.
    pub fn render_next_chunk(&mut self, world: &World, sink: &mut dyn FrameSink) -> JobStatus {
        if !self.is_current() {
            log::debug!(
                "Render {} superseded after {}/{} chunks",
                self.token,
                self.next,
                self.chunks.len()
            );
            return JobStatus::Superseded;
        }

        let Some(chunk) = self.chunks.get(self.next) else {
            return JobStatus::Finished;
        };

        let settings = &self.settings;
        let rays = *self
            .rays
            .get_or_insert_with(|| world.camera().ray_generator(settings.aspect()));
        let ctx = RenderContext::with_rays(world, settings, rays);
        render_chunk(chunk, &ctx, sink);
        self.next += 1;
        log::debug!(
            "Render {}: chunk {}/{} at ({}, {})",
            self.token,
            self.next,
            self.chunks.len(),
            chunk.x,
            chunk.y
        );

        if self.next == self.chunks.len() {
            log::info!(
                "Render {} finished: {}x{}, {} chunks",
                self.token,
                self.settings.width,
                self.settings.height,
                self.chunks.len()
            );
            JobStatus::Finished
        } else {
            JobStatus::Pending {
                completed: self.next,
                total: self.chunks.len(),
            }
        }
    }

    /// Run one step and put the job back on `queue` if work remains.
    pub fn resume(
        mut self,
        world: &World,
        sink: &mut dyn FrameSink,
        queue: &mut dyn TaskQueue,
    ) -> JobStatus {
        let status = self.render_next_chunk(world, sink);
        if let JobStatus::Pending { .. } = status {
            queue.defer(self);
        }
        status
    }
}

/// First-in first-out queue driven by the host's loop.
#[derive(Debug, Default)]
pub struct LocalQueue {
    jobs: VecDeque<RenderJob>,
}

impl LocalQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_idle(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Progress of the job at the front of the queue.
    pub fn progress(&self) -> Option<(usize, usize)> {
        self.jobs.front().map(RenderJob::progress)
    }

    /// Run the oldest waiting job for one step.
    pub fn pump(&mut self, world: &World, sink: &mut dyn FrameSink) -> Option<JobStatus> {
        let job = self.jobs.pop_front()?;
        Some(job.resume(world, sink, self))
    }

    /// Pump until no jobs remain. Returns the number of steps taken.
    pub fn run_until_idle(&mut self, world: &World, sink: &mut dyn FrameSink) -> usize {
        let mut steps = 0;
        while self.pump(world, sink).is_some() {
            steps += 1;
        }
        steps
    }
}

impl TaskQueue for LocalQueue {
    fn defer(&mut self, job: RenderJob) {
        self.jobs.push_back(job);
    }
}

/// Starts renders and supersedes stale ones.
#[derive(Debug)]
pub struct Scheduler {
    generation: RenderGeneration,
    chunk_size: u32,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self {
            generation: RenderGeneration::new(),
            chunk_size: CHUNK_SIZE,
        }
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_chunk_size(mut self, chunk_size: u32) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Start a render and return its generation token.
    ///
    /// Supersedes any render in flight, resizes and clears `sink`, and
    /// queues the first chunk. Returns without tracing any rays.
    pub fn render(
        &self,
        sink: &mut dyn FrameSink,
        settings: &Settings,
        queue: &mut dyn TaskQueue,
    ) -> u64 {
        let settings = settings.sanitized();
        let token = self.generation.advance();

        sink.resize(settings.width, settings.height);
        sink.clear();

        let chunks = generate_chunks(settings.width, settings.height, self.chunk_size);
        log::info!(
            "Render {} started: {}x{}, {} chunks, {} subsamples, depth {}",
            token,
            settings.width,
            settings.height,
            chunks.len(),
            u64::from(settings.subsamples).pow(2),
            settings.max_depth
        );

        queue.defer(RenderJob {
            generation: self.generation.clone(),
            token,
            settings,
            chunks,
            next: 0,
            rays: None,
        });
        token
    }

    /// Stop the render in flight at its next chunk.
    pub fn cancel(&self) {
        let token = self.generation.advance();
        log::info!("Render cancelled (generation {})", token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{render_pixel, ImageBuffer};
    use glint_core::{Color, Material, Scene, SceneObject, Shape, Transform};
    use glint_math::{Camera, Vec3};

    /// Records every write in order.
    #[derive(Default)]
    struct RecordingSink {
        width: u32,
        height: u32,
        writes: Vec<(u32, u32)>,
        clears: usize,
    }

    impl FrameSink for RecordingSink {
        fn width(&self) -> u32 {
            self.width
        }

        fn height(&self) -> u32 {
            self.height
        }

        fn set_pixel(&mut self, x: u32, y: u32, _color: Color) {
            self.writes.push((x, y));
        }

        fn clear(&mut self) {
            self.clears += 1;
        }

        fn resize(&mut self, width: u32, height: u32) {
            self.width = width;
            self.height = height;
        }
    }

    fn world() -> World {
        let mut scene = Scene::new("ball", Camera::new(Vec3::new(0.0, 0.0, 3.0), Vec3::ZERO));
        scene.add_object(SceneObject::new(
            "ball",
            Shape::sphere(1.0),
            Arc::new(Material::new("white", Color::ONE)),
            Transform::default(),
        ));
        World::from_scene(&scene)
    }

    fn settings(width: u32, height: u32) -> Settings {
        Settings {
            width,
            height,
            ..Default::default()
        }
    }

    #[test]
    fn test_render_is_deferred() {
        let world = world();
        let scheduler = Scheduler::new();
        let mut queue = LocalQueue::new();
        let mut sink = RecordingSink::default();

        scheduler.render(&mut sink, &settings(40, 40), &mut queue);

        assert_eq!((sink.width, sink.height), (40, 40));
        assert_eq!(sink.clears, 1);
        assert!(sink.writes.is_empty());
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.progress(), Some((0, 4)));

        assert_eq!(
            queue.pump(&world, &mut sink),
            Some(JobStatus::Pending {
                completed: 1,
                total: 4
            })
        );
        assert_eq!(sink.writes.len(), 32 * 32);
    }

    #[test]
    fn test_full_render_matches_pixels() {
        let world = world();
        let scheduler = Scheduler::new();
        let mut queue = LocalQueue::new();
        let mut image = ImageBuffer::new(1, 1);
        let settings = settings(48, 40);

        scheduler.render(&mut image, &settings, &mut queue);
        let steps = queue.run_until_idle(&world, &mut image);

        assert_eq!(steps, generate_chunks(48, 40, CHUNK_SIZE).len());
        assert!(queue.is_idle());

        let ctx = RenderContext::new(&world, &settings);
        for (x, y) in [(0, 0), (24, 20), (47, 39), (33, 5)] {
            assert_eq!(image.get(x, y), render_pixel(x, y, &ctx));
        }
        // The ball is in view
        assert_eq!(image.get(24, 20), Color::ONE);
    }

    #[test]
    fn test_write_order_is_row_major_within_row_major_chunks() {
        let world = world();
        let scheduler = Scheduler::new().with_chunk_size(2);
        let mut queue = LocalQueue::new();
        let mut sink = RecordingSink::default();

        scheduler.render(&mut sink, &settings(4, 3), &mut queue);
        queue.run_until_idle(&world, &mut sink);

        assert_eq!(
            sink.writes,
            vec![
                (0, 0), (1, 0), (0, 1), (1, 1),
                (2, 0), (3, 0), (2, 1), (3, 1),
                (0, 2), (1, 2),
                (2, 2), (3, 2),
            ]
        );
    }

    #[test]
    fn test_new_render_supersedes_old() {
        let world = world();
        let scheduler = Scheduler::new();
        let mut queue = LocalQueue::new();
        let mut sink = RecordingSink::default();

        let first = scheduler.render(&mut sink, &settings(64, 64), &mut queue);
        queue.pump(&world, &mut sink);

        let second = scheduler.render(&mut sink, &settings(32, 32), &mut queue);
        assert!(second > first);
        sink.writes.clear();

        // The stale job is first in line and must not write
        assert_eq!(queue.pump(&world, &mut sink), Some(JobStatus::Superseded));
        assert!(sink.writes.is_empty());

        assert_eq!(queue.pump(&world, &mut sink), Some(JobStatus::Finished));
        assert_eq!(sink.writes.len(), 32 * 32);
        assert!(queue.is_idle());
    }

    #[test]
    fn test_cancel_stops_job() {
        let world = world();
        let scheduler = Scheduler::new();
        let mut queue = LocalQueue::new();
        let mut sink = RecordingSink::default();

        scheduler.render(&mut sink, &settings(64, 64), &mut queue);
        scheduler.cancel();

        assert_eq!(queue.run_until_idle(&world, &mut sink), 1);
        assert!(sink.writes.is_empty());
    }

    #[test]
    fn test_settings_are_snapshotted_and_sanitized() {
        let world = world();
        let scheduler = Scheduler::new();
        let mut queue = LocalQueue::new();
        let mut sink = RecordingSink::default();

        let mut live = Settings {
            width: 0,
            height: 2,
            subsamples: 0,
            ..Default::default()
        };
        scheduler.render(&mut sink, &live, &mut queue);
        live.width = 500;

        assert_eq!((sink.width, sink.height), (1, 2));
        queue.run_until_idle(&world, &mut sink);
        assert_eq!(sink.writes, vec![(0, 0), (0, 1)]);
    }

    #[test]
    fn test_generation_clones_share_counter() {
        let a = RenderGeneration::new();
        let b = a.clone();
        assert_eq!(a.advance(), 1);
        assert_eq!(b.current(), 1);
        assert_eq!(b.advance(), 2);
        assert_eq!(a.current(), 2);
    }

    #[test]
    fn test_lit_sphere_at_center_pixel() {
        // Camera and light at the origin, sphere surface 4 units ahead along
        // the center pixel's ray.
        let mut scene = Scene::new("sphere", Camera::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0)));
        scene.add_object(SceneObject::new(
            "ball",
            Shape::sphere(1.0),
            Arc::new(
                Material::new("ball", Color::new(0.8, 0.2, 0.4))
                    .with_specular(Color::splat(0.2), 20.0),
            ),
            Transform::from_translation(Vec3::new(0.0, 0.0, -5.0)),
        ));
        scene.add_light(glint_core::PointLight::new(Vec3::ZERO, Color::ONE, 1.0));
        let world = World::from_scene(&scene);

        let settings = Settings {
            width: 3,
            height: 3,
            exact_spheres: true,
            phong: true,
            ..Default::default()
        };
        let scheduler = Scheduler::new();
        let mut queue = LocalQueue::new();
        let mut image = ImageBuffer::new(1, 1);

        scheduler.render(&mut image, &settings, &mut queue);
        queue.run_until_idle(&world, &mut image);

        assert!((image.get(1, 1) - Color::new(0.25, 0.1, 0.15)).length() < 1e-4);
        // Corner rays miss the sphere
        assert_eq!(image.get(0, 0), Color::ZERO);
    }
}
