//! Centralized integration tests for autowire-impl crate
//!
//! 走显式注册路径（描述符构建器）验证注册表与解析器的行为。

use autowire_abstractions::{ComponentResolver, ComponentScanner};
use autowire_common::{
    registration, BoxedComponent, ComponentDescriptor, ComponentError, ResolveError, TypeInfo,
};
use autowire_impl::{CompileTimeScanner, Registry, Resolver};
use std::sync::atomic::{AtomicUsize, Ordering};

/// 实例序号，用于观察瞬时语义
static INSTANCE_COUNTER: AtomicUsize = AtomicUsize::new(0);

#[derive(Debug)]
struct Repository {
    serial: usize,
}

impl Default for Repository {
    fn default() -> Self {
        Self {
            serial: INSTANCE_COUNTER.fetch_add(1, Ordering::SeqCst),
        }
    }
}

#[derive(Debug)]
struct Service {
    repository: Repository,
}

#[derive(Debug, Default)]
struct Handler {
    repository: Option<Repository>,
}

/// 没有任何组件标记的类型
#[derive(Debug, Default)]
struct Plain;

/// 只注册全局标记、不进入任何注册表的类型
#[derive(Debug, Default)]
struct OrphanMarked;

/// 扫描器测试专用类型
#[derive(Debug, Default)]
struct ScannedFixture;

fn repository_descriptor() -> ComponentDescriptor {
    ComponentDescriptor::from_default::<Repository>("repository")
}

fn service_descriptor() -> ComponentDescriptor {
    ComponentDescriptor::builder::<Service>("service")
        .constructor(vec![TypeInfo::of::<Repository>()], |mut args| {
            let repository = args
                .remove(0)
                .downcast::<Repository>()
                .map_err(|_| "参数类型不匹配")?;
            Ok(Box::new(Service {
                repository: *repository,
            }) as BoxedComponent)
        })
        .build()
        .unwrap()
}

fn handler_descriptor() -> ComponentDescriptor {
    ComponentDescriptor::builder::<Handler>("handler")
        .parameterless(|| Ok(Box::new(Handler::default()) as BoxedComponent))
        .inject_field("repository", TypeInfo::of::<Repository>(), |instance, value| {
            let handler = instance
                .as_mut()
                .downcast_mut::<Handler>()
                .ok_or("宿主类型不匹配")?;
            let repository = value.downcast::<Repository>().map_err(|_| "字段类型不匹配")?;
            handler.repository = Some(*repository);
            Ok(())
        })
        .build()
        .unwrap()
}

#[test]
fn resolves_component_without_dependencies() {
    let registry = Registry::builder()
        .register(repository_descriptor())
        .build()
        .unwrap();
    let resolver = Resolver::new(registry);

    let repository: Repository = resolver.resolve_as("repository").unwrap();
    let _ = repository.serial;
    assert!(resolver.can_resolve("repository"));
}

#[test]
fn unknown_component_is_rejected() {
    let registry = Registry::builder().build().unwrap();
    let resolver = Resolver::new(registry);

    let error = resolver.resolve("missing").unwrap_err();
    assert!(matches!(
        error,
        ResolveError::UnknownComponent { name, .. } if name == "missing"
    ));
    assert!(!resolver.can_resolve("missing"));
}

#[test]
fn constructor_injection_wires_dependency() {
    let registry = Registry::builder()
        .register(repository_descriptor())
        .register(service_descriptor())
        .build()
        .unwrap();
    let resolver = Resolver::new(registry);

    let service: Service = resolver.resolve_as("service").unwrap();
    let _ = service.repository.serial;
}

#[test]
fn field_injection_populates_field() {
    let registry = Registry::builder()
        .register(repository_descriptor())
        .register(handler_descriptor())
        .build()
        .unwrap();
    let resolver = Resolver::new(registry);

    let handler: Handler = resolver.resolve_as("handler").unwrap();
    assert!(handler.repository.is_some());
}

#[test]
fn consecutive_resolutions_yield_distinct_instances() {
    let registry = Registry::builder()
        .register(repository_descriptor())
        .build()
        .unwrap();
    let resolver = Resolver::new(registry);

    let first: Repository = resolver.resolve_as("repository").unwrap();
    let second: Repository = resolver.resolve_as("repository").unwrap();
    assert_ne!(first.serial, second.serial);
}

#[test]
fn unmarked_dependency_fails_at_any_depth() {
    // service -> broken -> Plain（无标记），错误出现在第二层
    let broken = ComponentDescriptor::builder::<Handler>("broken")
        .constructor(vec![TypeInfo::of::<Plain>()], |_| {
            Ok(Box::new(Handler::default()) as BoxedComponent)
        })
        .build()
        .unwrap();
    let outer = ComponentDescriptor::builder::<Service>("outer")
        .constructor(vec![TypeInfo::of::<Handler>()], |_| {
            Err("不应该走到这里".into())
        })
        .build()
        .unwrap();

    let registry = Registry::builder()
        .register(broken)
        .register(outer)
        .build()
        .unwrap();
    let resolver = Resolver::new(registry);

    let error = resolver.resolve("outer").unwrap_err();
    match error {
        ResolveError::InvalidInjectionTarget { type_name, chain } => {
            assert!(type_name.ends_with("Plain"));
            assert_eq!(chain, "outer -> broken");
        }
        other => panic!("期望 InvalidInjectionTarget, 实际 {other:?}"),
    }
}

#[test]
fn construction_failure_propagates_to_caller() {
    let failing = ComponentDescriptor::builder::<Repository>("failing")
        .parameterless(|| Err("数据库不可用".into()))
        .build()
        .unwrap();
    let dependent = ComponentDescriptor::builder::<Service>("dependent")
        .constructor(vec![TypeInfo::of::<Repository>()], |mut args| {
            let repository = args
                .remove(0)
                .downcast::<Repository>()
                .map_err(|_| "参数类型不匹配")?;
            Ok(Box::new(Service {
                repository: *repository,
            }) as BoxedComponent)
        })
        .build()
        .unwrap();

    // 把 failing 注册成 Repository 类型对应的组件
    let registry = Registry::builder()
        .register(failing)
        .register(dependent)
        .build()
        .unwrap();
    let resolver = Resolver::new(registry);

    let error = resolver.resolve("dependent").unwrap_err();
    assert!(matches!(
        error,
        ResolveError::ConstructionFailure { ref name, .. } if name == "failing"
    ));
}

#[test]
fn duplicate_component_name_aborts_build() {
    let error = Registry::builder()
        .register(repository_descriptor())
        .register(ComponentDescriptor::from_default::<Handler>("repository"))
        .build()
        .unwrap_err();
    assert!(matches!(
        error,
        ComponentError::DuplicateComponentName { name, .. } if name == "repository"
    ));
}

#[test]
fn circular_dependency_is_refused() {
    // service <-> handler 互相依赖
    let service = ComponentDescriptor::builder::<Service>("service")
        .constructor(vec![TypeInfo::of::<Handler>()], |_| {
            Err("不应该构造成功".into())
        })
        .build()
        .unwrap();
    let handler = ComponentDescriptor::builder::<Handler>("handler")
        .constructor(vec![TypeInfo::of::<Service>()], |_| {
            Err("不应该构造成功".into())
        })
        .build()
        .unwrap();

    let registry = Registry::builder()
        .register(service)
        .register(handler)
        .build()
        .unwrap();

    let validation = registry.validate().unwrap_err();
    assert!(validation
        .iter()
        .any(|error| matches!(error, ComponentError::CircularDependency { .. })));

    let resolver = Resolver::new(registry);
    let error = resolver.resolve("service").unwrap_err();
    assert!(matches!(
        error,
        ResolveError::CircularDependency { chain } if chain == "service -> handler -> service"
    ));
}

#[test]
fn validate_reports_unmarked_and_missing_dependencies() {
    // Plain 无标记; OrphanMarked 有全局标记但不在本注册表中
    registration::register_component_descriptor(ComponentDescriptor::from_default::<OrphanMarked>(
        "orphan_marked",
    ));

    let service = ComponentDescriptor::builder::<Service>("service")
        .constructor(
            vec![TypeInfo::of::<Plain>(), TypeInfo::of::<OrphanMarked>()],
            |_| Err("只做校验".into()),
        )
        .build()
        .unwrap();

    let registry = Registry::builder().register(service).build().unwrap();
    let errors = registry.validate().unwrap_err();

    assert!(errors
        .iter()
        .any(|error| matches!(error, ComponentError::UnmarkedDependency { .. })));
    assert!(errors.iter().any(|error| matches!(
        error,
        ComponentError::MissingDependency { target, .. } if target == "orphan_marked"
    )));
}

#[test]
fn typed_resolution_rejects_wrong_type() {
    let registry = Registry::builder()
        .register(repository_descriptor())
        .build()
        .unwrap();
    let resolver = Resolver::new(registry);

    let error = resolver.resolve_as::<Service>("repository").unwrap_err();
    assert!(matches!(error, ResolveError::TypeMismatch { .. }));
}

#[tokio::test]
async fn scanner_exposes_globally_registered_components() {
    registration::register_component_descriptor(ComponentDescriptor::from_default::<ScannedFixture>(
        "scanned_fixture",
    ));

    let scanner = CompileTimeScanner::new();
    assert_eq!(scanner.name(), "CompileTimeScanner");

    let descriptors = scanner.scan("integration_test").await.unwrap();
    assert!(descriptors
        .iter()
        .any(|descriptor| descriptor.name == "scanned_fixture"));
}
