//! codec::writer
//!
//! Text layout of `project.pbxproj`, the way Xcode writes it.
//!
//! # Layout
//!
//! - `// !$*UTF8*$!` header, then one root dictionary
//! - objects grouped into `/* Begin <isa> section */` blocks, sections in
//!   `isa` order, objects in identifier order
//! - inside an object `isa` comes first, then keys in byte order
//! - `PBXBuildFile` and `PBXFileReference` objects on a single line
//! - identifiers annotated with `/* name */` wherever a name is known

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt::Write;

use crate::core::model::{Attributes, PlistValue};

/// Keys whose identifier values Xcode writes without an annotation.
const UNANNOTATED_KEYS: &[&str] = &["remoteGlobalIDString", "TestTargetID"];

/// One object ready to be written.
#[derive(Debug, Clone)]
pub struct EncodedObject {
    pub id: String,
    pub isa: String,
    pub attributes: Attributes,
}

impl EncodedObject {
    fn single_line(&self) -> bool {
        matches!(self.isa.as_str(), "PBXBuildFile" | "PBXFileReference")
    }
}

/// A whole project file.
#[derive(Debug, Clone)]
pub struct Document {
    pub archive_version: String,
    pub classes: Attributes,
    pub object_version: String,
    pub objects: Vec<EncodedObject>,
    pub root: String,
    /// Identifier to annotation text.
    pub annotations: HashMap<String, String>,
}

/// Render a document to text.
pub fn render(doc: &Document) -> String {
    let mut w = Writer {
        out: String::new(),
        annotations: &doc.annotations,
    };
    w.out.push_str("// !$*UTF8*$!\n{\n");

    w.line(1, &format!("archiveVersion = {};", quote(&doc.archive_version)));
    w.indent(1);
    w.out.push_str("classes = ");
    w.dict(&doc.classes, 1);
    w.out.push_str(";\n");
    w.line(1, &format!("objectVersion = {};", quote(&doc.object_version)));
    w.line(1, "objects = {");

    let mut objects: Vec<&EncodedObject> = doc.objects.iter().collect();
    objects.sort_by(|a, b| a.isa.cmp(&b.isa).then_with(|| a.id.cmp(&b.id)));

    let mut current: Option<&str> = None;
    for object in objects {
        if current != Some(object.isa.as_str()) {
            if let Some(isa) = current {
                let _ = writeln!(w.out, "/* End {} section */", isa);
            }
            let _ = writeln!(w.out, "\n/* Begin {} section */", object.isa);
            current = Some(object.isa.as_str());
        }
        w.object(object);
    }
    if let Some(isa) = current {
        let _ = writeln!(w.out, "/* End {} section */", isa);
    }

    w.line(1, "};");
    let root = w.reference(&doc.root);
    w.line(1, &format!("rootObject = {};", root));
    w.out.push_str("}\n");
    w.out
}

/// Quote a string if it cannot be written bare.
pub fn quote(s: &str) -> Cow<'_, str> {
    let bare = !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '$' | '/' | ':' | '.'))
        && !s.contains("___")
        && !s.contains("//");
    if bare {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\0' => out.push_str("\\0"),
            other => out.push(other),
        }
    }
    out.push('"');
    Cow::Owned(out)
}

struct Writer<'a> {
    out: String,
    annotations: &'a HashMap<String, String>,
}

impl Writer<'_> {
    fn indent(&mut self, depth: usize) {
        for _ in 0..depth {
            self.out.push('\t');
        }
    }

    fn line(&mut self, depth: usize, text: &str) {
        self.indent(depth);
        self.out.push_str(text);
        self.out.push('\n');
    }

    /// A string value, annotated if it names a known object.
    fn reference(&self, s: &str) -> String {
        match self.annotations.get(s) {
            Some(comment) => format!("{} /* {} */", quote(s), comment),
            None => quote(s).into_owned(),
        }
    }

    fn object(&mut self, object: &EncodedObject) {
        self.indent(2);
        let head = self.reference(&object.id);
        self.out.push_str(&head);
        self.out.push_str(" = ");
        if object.single_line() {
            let _ = write!(self.out, "{{isa = {}; ", quote(&object.isa));
            for (key, value) in &object.attributes {
                let _ = write!(self.out, "{} = ", quote(key));
                match value {
                    PlistValue::String(s) if UNANNOTATED_KEYS.contains(&key.as_str()) => {
                        self.out.push_str(&quote(s));
                    }
                    _ => self.inline(value),
                }
                self.out.push_str("; ");
            }
            self.out.push_str("};\n");
        } else {
            self.out.push_str("{\n");
            self.line(3, &format!("isa = {};", quote(&object.isa)));
            for (key, value) in &object.attributes {
                self.entry(key, value, 3);
            }
            self.line(2, "};");
        }
    }

    fn value(&mut self, value: &PlistValue, depth: usize) {
        match value {
            PlistValue::String(s) => {
                let text = self.reference(s);
                self.out.push_str(&text);
            }
            PlistValue::Array(items) => {
                self.out.push_str("(\n");
                for item in items {
                    self.indent(depth + 1);
                    self.value(item, depth + 1);
                    self.out.push_str(",\n");
                }
                self.indent(depth);
                self.out.push(')');
            }
            PlistValue::Dict(map) => self.dict(map, depth),
        }
    }

    fn dict(&mut self, map: &Attributes, depth: usize) {
        self.out.push_str("{\n");
        for (key, value) in map {
            self.entry(key, value, depth + 1);
        }
        self.indent(depth);
        self.out.push('}');
    }

    fn entry(&mut self, key: &str, value: &PlistValue, depth: usize) {
        self.indent(depth);
        let _ = write!(self.out, "{} = ", quote(key));
        match value {
            PlistValue::String(s) if UNANNOTATED_KEYS.contains(&key) => {
                self.out.push_str(&quote(s));
            }
            _ => self.value(value, depth),
        }
        self.out.push_str(";\n");
    }

    fn inline(&mut self, value: &PlistValue) {
        match value {
            PlistValue::String(s) => {
                let text = self.reference(s);
                self.out.push_str(&text);
            }
            PlistValue::Array(items) => {
                self.out.push('(');
                for item in items {
                    self.inline(item);
                    self.out.push_str(", ");
                }
                self.out.push(')');
            }
            PlistValue::Dict(map) => {
                self.out.push('{');
                for (key, value) in map {
                    let _ = write!(self.out, "{} = ", quote(key));
                    self.inline(value);
                    self.out.push_str("; ");
                }
                self.out.push('}');
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(objects: Vec<EncodedObject>, annotations: &[(&str, &str)]) -> Document {
        Document {
            archive_version: "1".into(),
            classes: Attributes::new(),
            object_version: "56".into(),
            objects,
            root: "ROOT".into(),
            annotations: annotations
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    fn object(id: &str, isa: &str, attrs: &[(&str, PlistValue)]) -> EncodedObject {
        EncodedObject {
            id: id.into(),
            isa: isa.into(),
            attributes: attrs
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        }
    }

    mod quoting {
        use super::*;

        #[test]
        fn bare_when_safe() {
            assert_eq!(quote("Sources/main.swift"), "Sources/main.swift");
            assert_eq!(quote("$SRCROOT"), "$SRCROOT");
        }

        #[test]
        fn quoted_when_needed() {
            assert_eq!(quote(""), "\"\"");
            assert_eq!(quote("<group>"), "\"<group>\"");
            assert_eq!(quote("-ObjC"), "\"-ObjC\"");
            assert_eq!(quote("a//b"), "\"a//b\"");
            assert_eq!(quote("___VAR___"), "\"___VAR___\"");
            assert_eq!(quote("say \"hi\"\n"), "\"say \\\"hi\\\"\\n\"");
        }
    }

    mod layout {
        use super::*;

        #[test]
        fn sections_are_sorted_and_delimited() {
            let text = render(&doc(
                vec![
                    object("B2", "PBXGroup", &[("children", PlistValue::Array(vec![]))]),
                    object("A1", "PBXFileReference", &[("path", "a.swift".into())]),
                ],
                &[("A1", "a.swift")],
            ));
            let file_section = text.find("/* Begin PBXFileReference section */").unwrap();
            let group_section = text.find("/* Begin PBXGroup section */").unwrap();
            assert!(file_section < group_section);
            assert!(text.contains(
                "\t\tA1 /* a.swift */ = {isa = PBXFileReference; path = a.swift; };\n"
            ));
            assert!(text.contains("\t\tB2 = {\n\t\t\tisa = PBXGroup;\n\t\t\tchildren = (\n\t\t\t);\n\t\t};\n"));
            assert!(text.starts_with("// !$*UTF8*$!\n{\n\tarchiveVersion = 1;\n\tclasses = {\n\t};\n"));
            assert!(text.ends_with("\trootObject = ROOT;\n}\n"));
        }

        #[test]
        fn references_are_annotated() {
            let text = render(&doc(
                vec![object(
                    "G",
                    "PBXGroup",
                    &[("children", PlistValue::Array(vec!["F".into()]))],
                )],
                &[("F", "main.swift"), ("ROOT", "Project object")],
            ));
            assert!(text.contains("\t\t\t\tF /* main.swift */,\n"));
            assert!(text.contains("rootObject = ROOT /* Project object */;"));
        }

        #[test]
        fn inline_nested_settings() {
            let mut settings = Attributes::new();
            settings.insert(
                "ATTRIBUTES".into(),
                PlistValue::Array(vec!["CodeSignOnCopy".into()]),
            );
            let text = render(&doc(
                vec![object(
                    "BF",
                    "PBXBuildFile",
                    &[("settings", PlistValue::Dict(settings))],
                )],
                &[],
            ));
            assert!(text.contains(
                "BF = {isa = PBXBuildFile; settings = {ATTRIBUTES = (CodeSignOnCopy, ); }; };"
            ));
        }
    }
}
