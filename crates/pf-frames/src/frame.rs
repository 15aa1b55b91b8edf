//! The session's display regions.

/// A named display region of the session.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Frame {
    Item,
    Menu,
    Map,
    Main,
    ChatText,
    ChatForm,
}

impl Frame {
    pub const ALL: [Frame; 6] = [
        Frame::Item,
        Frame::Menu,
        Frame::Map,
        Frame::Main,
        Frame::ChatText,
        Frame::ChatForm,
    ];

    /// Name the session uses to address the frame.
    pub fn name(self) -> &'static str {
        match self {
            Frame::Item     => "itemFrame",
            Frame::Menu     => "menuFrame",
            Frame::Map      => "mapFrame",
            Frame::Main     => "mainFrame",
            Frame::ChatText => "chatFrame",
            Frame::ChatForm => "chatformFrame",
        }
    }

    /// Selector of an element whose presence means the frame has loaded.
    pub fn ready_selector(self) -> &'static str {
        match self {
            Frame::Item     => "body#frameitem",
            Frame::Menu     => "body#framemenu",
            Frame::Map      => "body#framemap",
            Frame::Main     => "body#framemain",
            Frame::ChatText => "body#framechattext",
            Frame::ChatForm => "body#framechatform form",
        }
    }
}

impl std::fmt::Display for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
