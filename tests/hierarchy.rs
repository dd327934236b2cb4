//! Class Hierarchy Analysis integration tests.
//!
//! These tests exercise the hierarchy through the public API only:
//! 1. Assemble a project with `ProjectLoader`
//! 2. Build a `Hierarchy` with the default or an explicit configuration
//! 3. Verify relation, visibility and dispatch properties

use callscope::{
    analysis::{DispatchVisibility, Hierarchy, HierarchyConfig},
    project::{
        ClassDef, ClassId, InvokeExpr, InvokeKind, MethodDef, MethodId, Modifiers, Project,
        ProjectLoader,
    },
    HierarchyError, Result,
};

fn public(name: &str) -> MethodDef {
    MethodDef::new(name).modifiers(Modifiers::PUBLIC)
}

fn class_id(project: &Project, name: &str) -> ClassId {
    project.class_id(name).expect("class not loaded")
}

fn method_id(project: &Project, class: &str, name: &str) -> MethodId {
    project.find_method(class, name, &[]).expect("method not loaded")
}

/// A small UI-like hierarchy in two packages.
///
/// ```text
/// ui.Listener (interface)      ui.Widget (abstract) <- ui.Button <- ui.IconButton
///      ^                            ^
///      |                            +- app.Toolbar implements ui.Listener
///      +--------- ui.Button implements ui.Listener
/// ```
fn widgets() -> Result<Project> {
    ProjectLoader::new()
        .class(
            ClassDef::interface("ui.Listener")
                .modifiers(Modifiers::PUBLIC)
                .method(public("onClick").modifiers(Modifiers::ABSTRACT)),
        )
        .class(
            ClassDef::new("ui.Widget")
                .modifiers(Modifiers::PUBLIC | Modifiers::ABSTRACT)
                .extends("java.lang.Object")
                .method(public("draw").modifiers(Modifiers::ABSTRACT))
                .method(MethodDef::new("layout").modifiers(Modifiers::PROTECTED))
                .method(MethodDef::new("invalidate"))
                .method(MethodDef::new("secret").modifiers(Modifiers::PRIVATE)),
        )
        .class(
            ClassDef::new("ui.Button")
                .modifiers(Modifiers::PUBLIC)
                .extends("ui.Widget")
                .implements("ui.Listener")
                .method(public("draw"))
                .method(public("onClick")),
        )
        .class(
            ClassDef::new("ui.IconButton")
                .modifiers(Modifiers::PUBLIC)
                .extends("ui.Button")
                .method(public("draw")),
        )
        .class(
            ClassDef::new("app.Toolbar")
                .modifiers(Modifiers::PUBLIC)
                .extends("ui.Widget")
                .implements("ui.Listener")
                .method(public("draw"))
                .method(public("onClick")),
        )
        .class(ClassDef::new("app.Helper"))
        .build()
}

#[test]
fn test_sub_classes_including_adds_self() -> Result<()> {
    let project = widgets()?;
    let hierarchy = Hierarchy::new(&project);

    for (id, class) in project.classes() {
        if class.is_interface() {
            continue;
        }
        let mut including = hierarchy.get_sub_classes_including(id)?;
        let mut expected = hierarchy.get_sub_classes(id)?.to_vec();
        expected.push(id);
        including.sort();
        expected.sort();
        assert_eq!(including, expected, "sub-classes of {}", class.name);
    }
    Ok(())
}

#[test]
fn test_transitive_sub_classes() -> Result<()> {
    let project = widgets()?;
    let hierarchy = Hierarchy::new(&project);

    let mut subs = hierarchy.get_sub_classes(class_id(&project, "ui.Widget"))?.to_vec();
    subs.sort();
    let mut expected = vec![
        class_id(&project, "ui.Button"),
        class_id(&project, "ui.IconButton"),
        class_id(&project, "app.Toolbar"),
    ];
    expected.sort();
    assert_eq!(subs, expected);

    assert!(hierarchy
        .get_sub_classes(class_id(&project, "ui.IconButton"))?
        .is_empty());
    Ok(())
}

#[test]
fn test_super_classes_stop_at_project_boundary() -> Result<()> {
    let project = widgets()?;
    let hierarchy = Hierarchy::new(&project);
    let icon = class_id(&project, "ui.IconButton");

    assert_eq!(
        hierarchy.get_super_classes(icon)?,
        vec![
            class_id(&project, "ui.Button"),
            class_id(&project, "ui.Widget")
        ]
    );
    assert_eq!(hierarchy.get_super_classes_including(icon)?[0], icon);
    Ok(())
}

#[test]
fn test_implementers_closed_under_subclassing() -> Result<()> {
    let project = widgets()?;
    let hierarchy = Hierarchy::new(&project);

    let mut implementers = hierarchy.get_implementers(class_id(&project, "ui.Listener"))?;
    implementers.sort();
    let mut expected = vec![
        class_id(&project, "ui.Button"),
        class_id(&project, "ui.IconButton"),
        class_id(&project, "app.Toolbar"),
    ];
    expected.sort();
    assert_eq!(implementers, expected);
    Ok(())
}

#[test]
fn test_iface_a_b_scenario() -> Result<()> {
    let project = ProjectLoader::new()
        .class(ClassDef::interface("a.Iface").modifiers(Modifiers::PUBLIC))
        .class(ClassDef::new("a.A").implements("a.Iface"))
        .class(ClassDef::new("a.B").extends("a.A"))
        .build()?;
    let hierarchy = Hierarchy::new(&project);

    let mut implementers = hierarchy.get_implementers(class_id(&project, "a.Iface"))?;
    implementers.sort();
    assert_eq!(
        implementers,
        vec![class_id(&project, "a.A"), class_id(&project, "a.B")]
    );
    Ok(())
}

#[test]
fn test_interface_extension_reaches_sub_interface_implementers() -> Result<()> {
    let project = ProjectLoader::new()
        .class(ClassDef::interface("a.Base").modifiers(Modifiers::PUBLIC))
        .class(
            ClassDef::interface("a.Child")
                .modifiers(Modifiers::PUBLIC)
                .implements("a.Base"),
        )
        .class(ClassDef::new("a.Impl").implements("a.Child"))
        .build()?;
    let base = class_id(&project, "a.Base");
    let child = class_id(&project, "a.Child");
    let implementer = class_id(&project, "a.Impl");

    let plain = Hierarchy::new(&project);
    assert!(plain.get_sub_interfaces(base)?.is_empty());
    assert!(plain.get_implementers(base)?.is_empty());

    let precise = Hierarchy::with_config(&project, HierarchyConfig::precise());
    assert_eq!(precise.get_sub_interfaces(base)?, &[child]);
    assert_eq!(precise.get_sub_interfaces_including(base)?.len(), 2);
    assert_eq!(precise.get_implementers(base)?, vec![implementer]);
    Ok(())
}

#[test]
fn test_is_subclass_reflexivity() -> Result<()> {
    let project = widgets()?;
    let hierarchy = Hierarchy::new(&project);

    for (id, class) in project.classes().filter(|(_, c)| !c.is_interface()) {
        assert!(hierarchy.is_subclass_including(id, id)?, "{}", class.name);
        assert!(!hierarchy.is_subclass(id, id)?, "{}", class.name);
    }

    let widget = class_id(&project, "ui.Widget");
    let icon = class_id(&project, "ui.IconButton");
    assert!(hierarchy.is_subclass(icon, widget)?);
    assert!(!hierarchy.is_subclass(widget, icon)?);
    Ok(())
}

#[test]
fn test_kind_contract_violations() -> Result<()> {
    let project = widgets()?;
    let hierarchy = Hierarchy::new(&project);
    let listener = class_id(&project, "ui.Listener");
    let button = class_id(&project, "ui.Button");

    assert_eq!(
        hierarchy.get_super_classes(listener),
        Err(HierarchyError::NotAClass("ui.Listener".to_string()))
    );
    assert_eq!(
        hierarchy.get_implementers(button),
        Err(HierarchyError::NotAnInterface("ui.Button".to_string()))
    );
    assert!(matches!(
        hierarchy.resolve_concrete_dispatch(listener, method_id(&project, "ui.Listener", "onClick")),
        Err(HierarchyError::NotAClass(_))
    ));
    Ok(())
}

#[test]
fn test_visibility_rules() -> Result<()> {
    let project = widgets()?;
    let hierarchy = Hierarchy::new(&project);
    let widget = class_id(&project, "ui.Widget");
    let button = class_id(&project, "ui.Button");
    let toolbar = class_id(&project, "app.Toolbar");
    let helper = class_id(&project, "app.Helper");

    // public method of a public class is visible from everywhere
    let draw = method_id(&project, "ui.Button", "draw");
    for (from, _) in project.classes() {
        assert!(hierarchy.is_visible_method(from, draw)?);
    }

    // private only from the declaring class
    let secret = method_id(&project, "ui.Widget", "secret");
    assert!(hierarchy.is_visible_method(widget, secret)?);
    assert!(!hierarchy.is_visible_method(button, secret)?);

    // protected from sub-classes and the package
    let layout = method_id(&project, "ui.Widget", "layout");
    assert!(hierarchy.is_visible_method(toolbar, layout)?);
    assert!(!hierarchy.is_visible_method(helper, layout)?);

    // package access
    let invalidate = method_id(&project, "ui.Widget", "invalidate");
    assert!(hierarchy.is_visible_method(button, invalidate)?);
    assert!(!hierarchy.is_visible_method(toolbar, invalidate)?);

    // package class
    assert!(!hierarchy.is_visible_class(button, helper)?);
    assert!(hierarchy.is_visible_class(toolbar, helper)?);
    Ok(())
}

#[test]
fn test_abstract_dispatch_skips_abstract_receivers() -> Result<()> {
    let project = widgets()?;
    let hierarchy = Hierarchy::new(&project);
    let widget = class_id(&project, "ui.Widget");
    let draw = method_id(&project, "ui.Widget", "draw");

    let mut targets = hierarchy.resolve_abstract_dispatch(widget, draw)?;
    targets.sort();
    let mut expected = vec![
        method_id(&project, "ui.Button", "draw"),
        method_id(&project, "ui.IconButton", "draw"),
        method_id(&project, "app.Toolbar", "draw"),
    ];
    expected.sort();
    assert_eq!(targets, expected);
    assert!(!targets.contains(&draw));
    Ok(())
}

#[test]
fn test_interface_dispatch() -> Result<()> {
    let project = widgets()?;
    let hierarchy = Hierarchy::new(&project);
    let on_click = method_id(&project, "ui.Listener", "onClick");
    let invoke = InvokeExpr::new(
        InvokeKind::Interface,
        "ui.Listener",
        "onClick",
        Vec::<String>::new(),
    );
    let container = method_id(&project, "ui.Button", "draw");

    let mut targets = hierarchy.resolve_invoke(&invoke, on_click, container)?;
    targets.sort();
    let mut expected = vec![
        method_id(&project, "ui.Button", "onClick"),
        method_id(&project, "app.Toolbar", "onClick"),
    ];
    expected.sort();
    // IconButton inherits Button.onClick, which is reported once
    assert_eq!(targets, expected);
    Ok(())
}

#[test]
fn test_static_invoke_is_exact() -> Result<()> {
    let project = widgets()?;
    let hierarchy = Hierarchy::new(&project);
    let container = method_id(&project, "app.Toolbar", "draw");

    for (method, _) in project.methods() {
        let invoke = InvokeExpr::new(InvokeKind::Static, "unused", "unused", Vec::<String>::new());
        assert_eq!(
            hierarchy.resolve_invoke(&invoke, method, container)?,
            vec![method]
        );
    }
    Ok(())
}

#[test]
fn test_dispatch_visibility_modes() -> Result<()> {
    let project = ProjectLoader::new()
        .class(
            ClassDef::new("p.Base")
                .modifiers(Modifiers::PUBLIC)
                .method(MethodDef::new("run")),
        )
        .class(
            ClassDef::new("q.Sub")
                .modifiers(Modifiers::PUBLIC)
                .extends("p.Base")
                .method(MethodDef::new("run")),
        )
        .build()?;
    let sub = class_id(&project, "q.Sub");
    let base_run = method_id(&project, "p.Base", "run");
    let sub_run = method_id(&project, "q.Sub", "run");

    // package-private p.Base.run is not visible from q.Sub, so the redeclaration is skipped
    let requested = Hierarchy::new(&project);
    assert_eq!(requested.resolve_concrete_dispatch(sub, base_run)?, base_run);

    let candidate = Hierarchy::with_config(
        &project,
        HierarchyConfig::default().with_dispatch_visibility(DispatchVisibility::CandidateMethod),
    );
    assert_eq!(candidate.resolve_concrete_dispatch(sub, base_run)?, sub_run);
    Ok(())
}

#[test]
fn test_deferred_entry_table() -> Result<()> {
    let project = ProjectLoader::new()
        .class(
            ClassDef::new("a.Job")
                .implements("kotlinx.coroutines.Job")
                .method(MethodDef::new("<init>"))
                .method(MethodDef::new("invoke")),
        )
        .class(
            ClassDef::new("a.Worker")
                .implements("java.lang.Runnable")
                .method(MethodDef::new("<init>"))
                .method(MethodDef::new("run")),
        )
        .build()?;
    let job = class_id(&project, "a.Job");
    let worker = class_id(&project, "a.Worker");

    let default = Hierarchy::new(&project);
    assert_eq!(default.resolve_deferred_entry(job)?, None);
    assert_eq!(
        default.resolve_deferred_entry(worker)?,
        Some(method_id(&project, "a.Worker", "run"))
    );

    let custom = Hierarchy::with_config(
        &project,
        HierarchyConfig::without_deferred_invocations()
            .with_deferred_invocation("kotlinx.coroutines.Job", "invoke"),
    );
    assert_eq!(
        custom.resolve_deferred_entry(job)?,
        Some(method_id(&project, "a.Job", "invoke"))
    );
    assert_eq!(custom.resolve_deferred_entry(worker)?, None);
    Ok(())
}

#[test]
fn test_cyclic_inheritance_terminates() -> Result<()> {
    let project = ProjectLoader::new()
        .class(ClassDef::new("a.X").extends("a.Y"))
        .class(ClassDef::new("a.Y").extends("a.X"))
        .build()?;
    let hierarchy = Hierarchy::new(&project);
    let x = class_id(&project, "a.X");
    let y = class_id(&project, "a.Y");

    assert_eq!(hierarchy.get_super_classes(x)?, vec![y]);
    assert_eq!(hierarchy.get_sub_classes(x)?, &[y]);
    Ok(())
}
