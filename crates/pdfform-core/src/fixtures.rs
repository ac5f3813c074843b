//! Form documents built in memory for tests

use lopdf::{Dictionary, Document, Object, ObjectId};

struct PageFixture {
    annots: Vec<Object>,
    indirect_annots: bool,
}

pub(crate) struct FixtureBuilder {
    doc: Document,
    pages_id: ObjectId,
    pages: Vec<PageFixture>,
}

impl FixtureBuilder {
    pub(crate) fn new() -> Self {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        Self {
            doc,
            pages_id,
            pages: Vec::new(),
        }
    }

    pub(crate) fn page(&mut self) -> usize {
        self.pages.push(PageFixture {
            annots: Vec::new(),
            indirect_annots: false,
        });
        self.pages.len() - 1
    }

    /// A page whose `/Annots` entry is itself an indirect reference
    pub(crate) fn page_with_indirect_annots(&mut self) -> usize {
        let index = self.page();
        self.pages[index].indirect_annots = true;
        index
    }

    pub(crate) fn add_object(&mut self, dict: Dictionary) -> ObjectId {
        self.doc.add_object(Object::Dictionary(dict))
    }

    pub(crate) fn add_widget(&mut self, page: usize, dict: Dictionary) -> ObjectId {
        let id = self.add_object(dict);
        self.pages[page].annots.push(Object::Reference(id));
        id
    }

    pub(crate) fn add_inline(&mut self, page: usize, dict: Dictionary) {
        self.pages[page].annots.push(Object::Dictionary(dict));
    }

    pub(crate) fn build(mut self) -> Document {
        let mut kids = Vec::new();

        for page in std::mem::take(&mut self.pages) {
            let mut page_dict = dict(vec![
                ("Type", Object::Name(b"Page".to_vec())),
                ("Parent", Object::Reference(self.pages_id)),
                ("MediaBox", rect([0, 0, 612, 792])),
            ]);

            if !page.annots.is_empty() {
                let annots = Object::Array(page.annots);
                if page.indirect_annots {
                    let annots_id = self.doc.add_object(annots);
                    page_dict.set("Annots", Object::Reference(annots_id));
                } else {
                    page_dict.set("Annots", annots);
                }
            }

            let page_id = self.doc.add_object(Object::Dictionary(page_dict));
            kids.push(Object::Reference(page_id));
        }

        let count = kids.len() as i64;
        self.doc.objects.insert(
            self.pages_id,
            Object::Dictionary(dict(vec![
                ("Type", Object::Name(b"Pages".to_vec())),
                ("Count", Object::Integer(count)),
                ("Kids", Object::Array(kids)),
            ])),
        );

        let catalog_id = self.doc.add_object(Object::Dictionary(dict(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(self.pages_id)),
        ])));
        self.doc.trailer.set("Root", Object::Reference(catalog_id));

        self.doc
    }
}

pub(crate) fn dict(entries: Vec<(&str, Object)>) -> Dictionary {
    let mut dict = Dictionary::new();
    for (key, value) in entries {
        dict.set(key, value);
    }
    dict
}

pub(crate) fn rect(corners: [i64; 4]) -> Object {
    Object::Array(corners.iter().map(|&c| Object::Integer(c)).collect())
}

fn widget(rect_corners: [i64; 4]) -> Dictionary {
    dict(vec![
        ("Type", Object::Name(b"Annot".to_vec())),
        ("Subtype", Object::Name(b"Widget".to_vec())),
        ("Rect", rect(rect_corners)),
    ])
}

pub(crate) fn text_field(name: &str, rect_corners: [i64; 4]) -> Dictionary {
    let mut field = widget(rect_corners);
    field.set("FT", Object::Name(b"Tx".to_vec()));
    field.set("T", Object::string_literal(name));
    field
}

pub(crate) fn checkbox_field(name: &str, rect_corners: [i64; 4]) -> Dictionary {
    let mut field = widget(rect_corners);
    field.set("FT", Object::Name(b"Btn".to_vec()));
    field.set("T", Object::string_literal(name));
    field.set("AS", Object::Name(b"Off".to_vec()));
    field
}

/// A widget named and typed only through its parent
pub(crate) fn kid_widget(parent: ObjectId, rect_corners: [i64; 4]) -> Dictionary {
    let mut kid = widget(rect_corners);
    kid.set("Parent", Object::Reference(parent));
    kid.set("AS", Object::Name(b"Off".to_vec()));
    kid
}

/// Three pages: a text field, a checkbox, a link and a two-button radio group
/// on page 1; a comb text field and an inline checkbox on page 2 (whose
/// `/Annots` is indirect); nothing on page 3.
pub(crate) fn sample_form() -> Document {
    let mut builder = FixtureBuilder::new();
    let first = builder.page();
    let second = builder.page_with_indirect_annots();
    builder.page();

    builder.add_widget(first, text_field("test", [100, 700, 300, 720]));
    builder.add_widget(first, checkbox_field("check", [100, 650, 116, 666]));
    builder.add_widget(
        first,
        dict(vec![
            ("Type", Object::Name(b"Annot".to_vec())),
            ("Subtype", Object::Name(b"Link".to_vec())),
            ("Rect", rect([10, 10, 50, 20])),
        ]),
    );

    let group = builder.add_object(dict(vec![
        ("FT", Object::Name(b"Btn".to_vec())),
        ("T", Object::string_literal("radio")),
        ("Ff", Object::Integer(1 << 15)),
    ]));
    builder.add_widget(first, kid_widget(group, [100, 600, 112, 612]));
    builder.add_widget(first, kid_widget(group, [150, 600, 162, 612]));

    let mut comb = text_field("test_2", [100, 700, 200, 720]);
    comb.set("MaxLen", Object::Integer(5));
    comb.set("Ff", Object::Integer(1 << 24));
    comb.set("Q", Object::Integer(1));
    builder.add_widget(second, comb);
    builder.add_inline(second, checkbox_field("check_2", [100, 650, 116, 666]));

    builder.build()
}

pub(crate) fn sample_form_bytes() -> Vec<u8> {
    let mut doc = sample_form();
    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

/// One page laid out the way Sejda writes forms: every widget is named
/// and typed by its parent.
pub(crate) fn sejda_form() -> Document {
    let mut builder = FixtureBuilder::new();
    let page = builder.page();

    let name = builder.add_object(dict(vec![
        ("FT", Object::Name(b"Tx".to_vec())),
        ("T", Object::string_literal("name")),
    ]));
    builder.add_widget(page, kid_widget(name, [50, 700, 250, 720]));

    let agree = builder.add_object(dict(vec![
        ("FT", Object::Name(b"Btn".to_vec())),
        ("T", Object::string_literal("agree")),
        ("Subtype", Object::Name(b"Widget".to_vec())),
    ]));
    builder.add_widget(page, kid_widget(agree, [50, 650, 66, 666]));

    builder.add_widget(
        page,
        dict(vec![
            ("Type", Object::Name(b"Annot".to_vec())),
            ("Subtype", Object::Name(b"Link".to_vec())),
            ("Rect", rect([10, 10, 50, 20])),
        ]),
    );

    let choice = builder.add_object(dict(vec![
        ("FT", Object::Name(b"Btn".to_vec())),
        ("T", Object::string_literal("choice")),
    ]));
    builder.add_widget(page, kid_widget(choice, [50, 600, 62, 612]));
    builder.add_widget(page, kid_widget(choice, [100, 600, 112, 612]));

    builder.build()
}

/// Route tracing output through the test harness; safe to call repeatedly
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}
