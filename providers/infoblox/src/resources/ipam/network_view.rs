//! infoblox_network_view

use crate::error::Result;
use crate::resource_data::ResourceData;
use crate::resources::common::{self, ObjectHandler, Operation};
use crate::schema::Attribute;
use ibclient::{Ea, NetworkView, ObjectManager};

#[derive(Debug, Default, Clone, Copy)]
pub struct NetworkViewHandler;

#[async_trait::async_trait]
impl ObjectHandler for NetworkViewHandler {
    type Object = NetworkView;
    const TYPE_NAME: &'static str = "infoblox_network_view";

    fn attributes(&self) -> Vec<Attribute> {
        vec![
            Attribute::string("name").required().describe("Name of the network view"),
            common::comment(),
        ]
    }

    async fn expand(&self, _manager: &ObjectManager<'_>, d: &ResourceData, ea: Ea, _op: Operation) -> Result<NetworkView> {
        Ok(NetworkView {
            reference: None,
            name: d.get_string("name"),
            comment: common::comment_of(d),
            ea,
        })
    }

    fn flatten(&self, view: &NetworkView, d: &mut ResourceData) -> Result<()> {
        d.set("name", view.name.as_str());
        common::set_comment(d, view.comment.as_deref());
        Ok(())
    }
}
