use super::{AlreadyReleasedError, ReleaseError, Release, SafeDisposable, impl_dispose_via};

/// Lifetime management for a value that comes from a factory and has to be handed back to some
/// release function, rather than just dropped.
///
/// Allocation is lazy: if the instance is never accessed, neither the allocation nor the release
/// function is ever called. Once allocated, the instance is passed to the release function exactly
/// once, on dispose or drop.
#[derive(Debug)]
pub struct FactoryScoped<'a, T> {
    core: SafeDisposable<Factory<'a, T>>,
}

type Allocate<'a, T> = Box<dyn FnOnce() -> T + Send + 'a>;
type ReleaseFn<'a, T> = Box<dyn FnOnce(T) + Send + 'a>;

impl<'a, T> FactoryScoped<'a, T> {
    pub fn new(
        allocate: impl FnOnce() -> T + Send + 'a,
        release: impl FnOnce(T) + Send + 'a,
    ) -> FactoryScoped<'a, T> {
        FactoryScoped {
            core: SafeDisposable::new(Factory {
                allocate: Some(Box::new(allocate)),
                release: Some(Box::new(release)),
                instance: None,
            }),
        }
    }

    /// Runs `f` against the managed instance, allocating it first if this is the first access.
    pub fn with_instance<U>(&self, f: impl FnOnce(&mut T) -> U) -> Result<U, AlreadyReleasedError> {
        self.core
            .with(|factory| f(factory.instance()))
            .map_err(|_| AlreadyReleasedError::of::<Self>())
    }

    /// Returns true if the instance has been allocated and not yet released.
    pub fn is_allocated(&self) -> bool {
        self.core
            .with(|factory| factory.instance.is_some())
            .unwrap_or(false)
    }
}

impl_dispose_via!(core for ['a, T] FactoryScoped<'a, T>);

struct Factory<'a, T> {
    allocate: Option<Allocate<'a, T>>,
    release: Option<ReleaseFn<'a, T>>,
    instance: Option<T>,
}

impl<T> Factory<'_, T> {
    fn instance(&mut self) -> &mut T {
        let allocate = &mut self.allocate;
        self.instance.get_or_insert_with(|| match allocate.take() {
            Some(allocate) => allocate(),
            // The allocator is only taken here, when the instance is first populated.
            None => unreachable!(),
        })
    }
}

impl<T> Release for Factory<'_, T> {
    fn release_unmanaged(&mut self) -> Result<(), ReleaseError> {
        if let (Some(instance), Some(release)) = (self.instance.take(), self.release.take()) {
            release(instance);
        }
        Ok(())
    }

    fn nullify_large_fields(&mut self) {
        self.allocate = None;
        self.release = None;
    }
}
